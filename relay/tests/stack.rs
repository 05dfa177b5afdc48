//! Reusable stacks, resolvers and the standard handlers.

use lazy_static::lazy_static;
use relay::{
    BoxHandler, Entry, Key, Next, Queue, Stack, StackBuilder,
    handlers::{Branch, LoggingHandler, Respond, When},
    testing::{CountingHandler, Passthrough, RecordingHandler},
};
use static_assertions::assert_impl_all;
use std::{collections::HashMap, sync::Arc, thread};

mod common;
use common::{SetStatus, Stop, TestRequest, TestResponse};

assert_impl_all!(Stack<TestRequest, TestResponse>: Send, Sync, Clone);
assert_impl_all!(StackBuilder<TestRequest, TestResponse>: Send, Sync);

lazy_static! {
    /// A tiny service container the resolver looks handlers up in.
    static ref SERVICES: HashMap<&'static str, BoxHandler<TestRequest, TestResponse>> = {
        let mut services: HashMap<&'static str, BoxHandler<TestRequest, TestResponse>> =
            HashMap::new();
        services.insert("created", Arc::new(SetStatus(201)));
        services.insert("teapot", Arc::new(Stop(418)));
        services
    };
}

fn resolve(
    entry: Entry<TestRequest, TestResponse>,
    _key: &Key,
) -> Entry<TestRequest, TestResponse> {
    match entry {
        Entry::Value(name) => match SERVICES.get(name.as_str()) {
            Some(handler) => Entry::Handler(Arc::clone(handler)),
            None => Entry::Value(name),
        },
        other => other,
    }
}

#[test]
fn test_stack_resolves_services() {
    let stack = StackBuilder::new()
        .handler(LoggingHandler::named("api"))
        .value("created".to_string())
        .named("tail", Entry::value("teapot".to_string()))
        .resolver(resolve)
        .build();

    let res = stack
        .dispatch(&TestRequest::new("/"), TestResponse::default())
        .unwrap();
    assert_eq!(res.status, 418);

    let keys: Vec<_> = stack.keys().cloned().collect();
    assert_eq!(keys, [Key::Index(0), Key::Index(1), Key::from("tail")]);
}

#[test]
fn test_stack_without_resolver_rejects_values() {
    let stack = StackBuilder::new().value("created".to_string()).build();
    assert!(!stack.has_resolver());

    let err = stack
        .dispatch(&TestRequest::new("/"), TestResponse::default())
        .unwrap_err();
    assert_eq!(err.key(), Some(&Key::Index(0)));
}

#[test]
fn test_stack_from_queue() {
    let queue = Queue::new().handler(SetStatus(201)).handler(SetStatus(202));
    let stack: Stack<TestRequest, TestResponse> = StackBuilder::from(queue).build();

    assert_eq!(stack.len(), 2);
    for _ in 0..3 {
        let res = stack
            .dispatch(&TestRequest::new("/"), TestResponse::default())
            .unwrap();
        assert_eq!(res.status, 202);
    }
}

#[test]
fn test_stack_shared_between_threads() {
    let recorder = RecordingHandler::<TestRequest>::new();
    let stack = Arc::new(
        StackBuilder::new()
            .handler(recorder.clone())
            .handler_fn(|req: &TestRequest, res: TestResponse, next: &mut Next<'_, _, _>| {
                next.attributes_mut().insert("path", req.path.clone());
                Ok(next.run(req, res)?)
            })
            .handler_fn(|_: &TestRequest, res: TestResponse, next: &mut Next<'_, _, _>| {
                let path = next.attributes().get::<String>("path").cloned();
                Ok(res.with_header("x-path", &path.unwrap_or_default()))
            })
            .build(),
    );

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let stack = Arc::clone(&stack);
            thread::spawn(move || {
                let path = format!("/{i}");
                let res = stack
                    .dispatch(&TestRequest::new(&path), TestResponse::default())
                    .unwrap();
                assert_eq!(res.headers, [("x-path".to_string(), path)]);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(recorder.count(), 8);
}

#[test]
fn test_stack_mounted_in_queue() {
    let inner = StackBuilder::new().handler(SetStatus(201)).build();
    let after = CountingHandler::new();

    let queue = Queue::new()
        .handler(inner)
        .handler(after.clone())
        .handler_fn(|_: &TestRequest, res: TestResponse, _: &mut Next<'_, _, _>| {
            Ok(res.with_header("x-after", "1"))
        });

    let res = relay::dispatch(&TestRequest::new("/"), TestResponse::default(), queue, None)
        .unwrap();
    assert_eq!(res.status, 201);
    assert_eq!(res.headers.len(), 1);
    assert_eq!(after.count(), 1);
}

#[test]
fn test_auth_branch() {
    let authenticated = |req: &TestRequest| req.header("authorization").is_some();
    let stack = StackBuilder::new()
        .handler(When::new(
            |req: &TestRequest| req.path.starts_with("/admin"),
            Branch::new(
                authenticated,
                Passthrough,
                Respond::new(TestResponse::default().with_status(403)),
            ),
        ))
        .handler(SetStatus(200))
        .build();

    let dispatch = |req: TestRequest| {
        stack
            .dispatch(&req, TestResponse::default().with_status(404))
            .unwrap()
            .status
    };

    assert_eq!(dispatch(TestRequest::new("/")), 200);
    assert_eq!(dispatch(TestRequest::new("/admin")), 403);
    assert_eq!(
        dispatch(TestRequest::new("/admin").with_header("authorization", "token")),
        200
    );
}

#[cfg(feature = "tracing")]
mod traced {
    use super::common::{Stop, TestRequest, TestResponse};
    use relay::{
        BoxError, Handler, Next, StackBuilder,
        handlers::{LoggingHandler, Traced},
    };
    use std::{
        fmt,
        sync::{Arc, Mutex},
    };
    use tracing::{
        Event, Subscriber,
        field::{Field, Visit},
        span,
    };
    use tracing_subscriber::{
        Layer,
        layer::{Context, SubscriberExt},
    };

    /// Records span `handler` fields and event messages, in order.
    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<String>>>);

    struct FieldValue(&'static str, Option<String>);

    impl Visit for FieldValue {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            if field.name() == self.0 {
                self.1 = Some(format!("{value:?}"));
            }
        }
    }

    impl<S: Subscriber> Layer<S> for Recorder {
        fn on_new_span(
            &self,
            attrs: &span::Attributes<'_>,
            _id: &span::Id,
            _ctx: Context<'_, S>,
        ) {
            let mut visitor = FieldValue("handler", None);
            attrs.record(&mut visitor);
            if let Some(name) = visitor.1 {
                self.0.lock().unwrap().push(format!("span:{name}"));
            }
        }

        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = FieldValue("message", None);
            event.record(&mut visitor);
            if let Some(message) = visitor.1 {
                self.0.lock().unwrap().push(format!("event:{message}"));
            }
        }
    }

    struct Audit;

    impl Handler<TestRequest, TestResponse> for Audit {
        type Output = TestResponse;

        fn call(
            &self,
            req: &TestRequest,
            res: TestResponse,
            next: &mut Next<'_, TestRequest, TestResponse>,
        ) -> Result<TestResponse, BoxError> {
            let res = next.run(req, res)?;
            tracing::info!(path = %req.path, status = res.status, "audited");
            Ok(res)
        }
    }

    #[test]
    fn test_traced_chain_emits_spans_and_events() {
        let recorder = Recorder::default();
        let subscriber = tracing_subscriber::registry().with(recorder.clone());

        let stack = StackBuilder::new()
            .handler(LoggingHandler::new())
            .handler(Traced::new(Audit, "audit"))
            .handler(Traced::new(Stop(204), "stop"))
            .build();

        let res = tracing::subscriber::with_default(subscriber, || {
            stack.dispatch(&TestRequest::new("/traced"), TestResponse::default())
        })
        .unwrap();
        assert_eq!(res.status, 204);

        let seen = recorder.0.lock().unwrap().clone();
        let relevant: Vec<_> = seen
            .iter()
            .filter(|line| {
                !line.starts_with("event:dispatch") && !line.starts_with("event:invoking")
            })
            .cloned()
            .collect();
        assert_eq!(
            relevant,
            [
                "event:handling request",
                "span:audit",
                "span:stop",
                "event:audited",
            ]
        );
    }
}
