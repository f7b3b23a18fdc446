//! `use_fetch`: JSON requests keyed by URL, with stale responses discarded.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use grapple_core::prelude::*;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },
    #[error("response from {url} is not valid JSON: {reason}")]
    Decode { url: String, reason: String },
}

/// Raw answer from a [`Transport`].
#[derive(Debug, Clone)]
pub struct Response {
    pub url: String,
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn ok(url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            url: url.into(),
            status: 200,
            body: body.into(),
        }
    }

    /// Decodes the body as JSON. The status code is not consulted.
    pub fn json(&self) -> Result<Value, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::Decode {
            url: self.url.clone(),
            reason: e.to_string(),
        })
    }
}

/// Network collaborator. The returned future resolves on some later turn of
/// the runtime's executor.
pub trait Transport: 'static {
    fn fetch(&self, url: &str) -> LocalBoxFuture<'static, Result<Response, FetchError>>;
}

/// Serves canned bodies from memory; unknown URLs fail at the transport level.
#[derive(Default)]
pub struct FixtureTransport {
    routes: RefCell<HashMap<String, Vec<u8>>>,
}

impl FixtureTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.routes.borrow_mut().insert(url.into(), body.into());
        self
    }
}

impl Transport for FixtureTransport {
    fn fetch(&self, url: &str) -> LocalBoxFuture<'static, Result<Response, FetchError>> {
        let outcome = match self.routes.borrow().get(url) {
            Some(body) => Ok(Response::ok(url, body.clone())),
            None => Err(FetchError::Transport {
                url: url.to_string(),
                reason: "no route".into(),
            }),
        };
        futures::future::ready(outcome).boxed_local()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchState {
    /// Body of the most recent successful request for the current URL.
    pub data: Option<Value>,
    /// True while the request for the current URL is outstanding.
    pub loading: bool,
    pub error: Option<FetchError>,
}

impl Default for FetchState {
    fn default() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }
}

/// Requests `url` on mount and whenever it changes.
///
/// `data` and `error` keep their previous values while a new request is in
/// flight. A response that arrives after the URL moved on, or after
/// teardown, is dropped without touching state.
pub fn use_fetch(transport: &Rc<dyn Transport>, url: &str) -> FetchState {
    let (state, set_state) = use_state(FetchState::default);
    let transport = transport.clone();
    let url = url.to_string();

    use_effect(url.clone(), move || {
        let stale = Rc::new(Cell::new(false));
        if !set_state.get().loading {
            set_state.update(|s| FetchState {
                loading: true,
                ..s.clone()
            });
        }

        log::debug!("fetching {url}");
        let request = transport.fetch(&url);
        let discarded = stale.clone();
        spawn_local(async move {
            let outcome = match request.await {
                Ok(response) => response.json(),
                Err(e) => Err(e),
            };
            if discarded.get() {
                log::debug!("discarding stale response for {url}");
                return;
            }
            let next = match outcome {
                Ok(data) => FetchState {
                    data: Some(data),
                    loading: false,
                    error: None,
                },
                Err(e) => {
                    log::debug!("{e}");
                    FetchState {
                        data: None,
                        loading: false,
                        error: Some(e),
                    }
                }
            };
            set_state.set(next);
        });

        on_unmount(move || stale.set(true))
    });

    state
}
