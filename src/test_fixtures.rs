//! Hand-written fakes shared by unit tests across modules.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::fetch::{HttpClient, HttpError, HttpRequest, HttpResponse};
use crate::runner::{CommandRunner, RunError, RunOutput};
use crate::schema::{Config, ExtractionSource, Format, Setting};
use crate::strategy::{Strategy, StrategyError};

/// Scripted reply of a [`FakeRunner`].
#[derive(Debug, Clone)]
pub enum Reply {
    /// Exit 0 with this output
    Output(RunOutput),
    /// Exit with this code and stderr
    Exit(i32, String),
}

#[derive(Debug, Clone)]
struct Script {
    reply: Reply,
    delay: Duration,
}

/// In-memory [`CommandRunner`] keyed by program name.
///
/// Unregistered programs fail as if they were not installed. A delay longer
/// than the caller's timeout yields [`RunError::Timeout`] once the timeout
/// has elapsed.
#[derive(Debug, Default)]
pub struct FakeRunner {
    scripts: Mutex<HashMap<String, Script>>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers stdout for `program`.
    pub fn on(self, program: &str, stdout: &str) -> Self {
        self.script(program, Reply::Output(RunOutput::new(stdout, "")), Duration::ZERO)
    }

    /// Registers a failing exit for `program`.
    pub fn on_exit(self, program: &str, code: i32, stderr: &str) -> Self {
        self.script(program, Reply::Exit(code, stderr.to_string()), Duration::ZERO)
    }

    /// Registers a reply delivered after `delay`.
    pub fn script(self, program: &str, reply: Reply, delay: Duration) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(program.to_string(), Script { reply, delay });
        self
    }

    /// Every `(program, args)` run so far.
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for FakeRunner {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<RunOutput, RunError> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec()));

        let script = self.scripts.lock().unwrap().get(program).cloned();
        let Some(script) = script else {
            return Err(RunError::Spawn {
                program: program.to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            });
        };

        if script.delay > timeout {
            tokio::time::sleep(timeout).await;
            return Err(RunError::Timeout {
                program: program.to_string(),
                timeout,
            });
        }
        tokio::time::sleep(script.delay).await;

        match script.reply {
            Reply::Output(output) => Ok(output),
            Reply::Exit(code, stderr) => Err(RunError::NonZeroExit {
                program: program.to_string(),
                code: Some(code),
                stderr,
            }),
        }
    }
}

/// In-memory [`HttpClient`] keyed by full URL.
///
/// Unregistered URLs answer 404.
#[derive(Debug, Default)]
pub struct MockClient {
    bodies: Mutex<HashMap<String, String>>,
    failing: Mutex<Vec<String>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `url` with 200 and `body`.
    pub fn serve(self, url: &str, body: &str) -> Self {
        self.bodies
            .lock()
            .unwrap()
            .insert(url.to_string(), body.to_string());
        self
    }

    /// Fails `url` with a connection error.
    pub fn fail(self, url: &str) -> Self {
        self.failing.lock().unwrap().push(url.to_string());
        self
    }

    /// URLs requested so far, in order.
    pub fn requested(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.url.to_string())
            .collect()
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let url = req.url.to_string();
        self.requests.lock().unwrap().push(req);

        if self.failing.lock().unwrap().contains(&url) {
            return Err(HttpError::Connection("connection refused".into()));
        }

        match self.bodies.lock().unwrap().get(&url) {
            Some(body) => Ok(HttpResponse::ok(body.as_str())),
            None => Ok(HttpResponse::new(
                http::StatusCode::NOT_FOUND,
                http::HeaderMap::new(),
                b"404: Not Found".to_vec(),
            )),
        }
    }
}

/// A [`Strategy`] with fixed apps, latency and outcome.
#[derive(Debug)]
pub struct ScriptedStrategy {
    name: String,
    priority: i32,
    apps: Vec<String>,
    delay: Duration,
    succeed: bool,
    calls: AtomicUsize,
}

impl ScriptedStrategy {
    fn build(name: &str, priority: i32, apps: &[&str], succeed: bool) -> Self {
        Self {
            name: name.to_string(),
            priority,
            apps: apps.iter().map(ToString::to_string).collect(),
            delay: Duration::ZERO,
            succeed,
            calls: AtomicUsize::new(0),
        }
    }

    /// Succeeds for `apps` with a config whose source method is `name`.
    pub fn succeeding(name: &str, priority: i32, apps: &[&str]) -> Self {
        Self::build(name, priority, apps, true)
    }

    /// Fails for `apps`.
    pub fn failing(name: &str, priority: i32, apps: &[&str]) -> Self {
        Self::build(name, priority, apps, false)
    }

    /// Delays every extraction.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of `extract` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Strategy for ScriptedStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn can_extract(&self, app: &str) -> bool {
        self.apps.iter().any(|a| a == app)
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    async fn extract(&self, app: &str) -> Result<Config, StrategyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;

        if self.succeed {
            Ok(Config::new(app, Format::Custom)
                .with_setting(Setting::inferred("strategy", &self.name))
                .with_source(ExtractionSource::new(self.name.as_str(), "scripted", 0.5)))
        } else {
            Err(StrategyError::Parse {
                location: format!("{} output", self.name),
            })
        }
    }

    fn apps(&self) -> Vec<String> {
        self.apps.clone()
    }
}
