#![allow(dead_code)]

use relay::{BoxError, Handler, Next, Response};
use std::{error::Error, fmt};

// ============================================================================
// Test Request / Response Types
// ============================================================================

#[derive(Clone, Debug, Default)]
pub struct TestRequest {
    pub path: String,
    pub headers: Vec<(String, String)>,
}

impl TestRequest {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
}

impl TestResponse {
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

impl Default for TestResponse {
    fn default() -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
        }
    }
}

impl Response for TestResponse {
    fn conforms(&self) -> bool {
        (100..600).contains(&self.status)
    }
}

// ============================================================================
// Test Handlers
// ============================================================================

/// Sets the status, then runs the rest of the chain.
pub struct SetStatus(pub u16);

impl Handler<TestRequest, TestResponse> for SetStatus {
    type Output = TestResponse;

    fn call(
        &self,
        req: &TestRequest,
        res: TestResponse,
        next: &mut Next<'_, TestRequest, TestResponse>,
    ) -> Result<TestResponse, BoxError> {
        Ok(next.run(req, res.with_status(self.0))?)
    }
}

/// Answers with the given status without calling `next`.
pub struct Stop(pub u16);

impl Handler<TestRequest, TestResponse> for Stop {
    type Output = TestResponse;

    fn call(
        &self,
        _req: &TestRequest,
        res: TestResponse,
        _next: &mut Next<'_, TestRequest, TestResponse>,
    ) -> Result<TestResponse, BoxError> {
        Ok(res.with_status(self.0))
    }
}

/// Fails with [`Denied`].
pub struct Deny;

impl Handler<TestRequest, TestResponse> for Deny {
    type Output = TestResponse;

    fn call(
        &self,
        req: &TestRequest,
        _res: TestResponse,
        _next: &mut Next<'_, TestRequest, TestResponse>,
    ) -> Result<TestResponse, BoxError> {
        Err(Box::new(Denied {
            path: req.path.clone(),
        }))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Denied {
    pub path: String,
}

impl fmt::Display for Denied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "access to {} denied", self.path)
    }
}

impl Error for Denied {}
