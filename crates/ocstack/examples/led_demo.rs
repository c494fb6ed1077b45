//! Toggleable LED server, the classic demo resource.
//!
//! Registers `/a/led`, then exercises discovery, GET, and PUT through a
//! loopback transport standing in for the CoAP/UDP adapter.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;

use serde_json::{Value, json};

use ocstack::{
    InboundSink, Method, Properties, Request, ResourceHandler, ResourceSpec, Stack, WriteReply,
};

struct Led {
    state: AtomicBool,
}

impl ResourceHandler for Led {
    fn read(&self, _req: &Request) -> Option<Value> {
        Some(json!({"state": self.state.load(Ordering::SeqCst)}))
    }

    fn write(&self, rep: Value, _req: &Request, reply: WriteReply) {
        if let Some(state) = rep.get("state").and_then(Value::as_bool) {
            self.state.store(state, Ordering::SeqCst);
            println!(" **** LED: /a/led now <{state}>");
        } else {
            println!(" **** LED: /a/led unknown payload");
        }
        reply.complete(Some(json!({"state": self.state.load(Ordering::SeqCst)})));
    }
}

/// Push one request through the sink and print the wire response.
fn roundtrip(sink: &Arc<dyn InboundSink>, request: Request) {
    let label = format!("{} {}", request.method(), request.uri());
    let (tx, rx) = mpsc::channel();
    sink.on_request(request, Box::new(move |json| tx.send(json).unwrap()));
    match rx.recv() {
        Ok(response) => println!("{label} -> {response}"),
        Err(_) => println!("{label} -> (no response)"),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("ocstack=debug")),
        )
        .init();

    let stack = Stack::new();
    stack
        .register_resource(
            ResourceSpec::new("/a/led")
                .resource_type("core.led")
                .interface("core.rw")
                .properties(Properties::DISCOVERABLE | Properties::OBSERVABLE)
                .handler(Led {
                    state: AtomicBool::new(false),
                }),
        )
        .expect("register /a/led");

    let sink: Arc<dyn InboundSink> = Arc::new(stack);

    roundtrip(&sink, Request::new(Method::Get, "/oc/core"));
    roundtrip(&sink, Request::new(Method::Get, "/a/led"));
    roundtrip(
        &sink,
        Request::new(Method::Put, "/a/led")
            .with_payload(br#"{"oc":[{"rep":{"state":true}}]}"#.to_vec()),
    );
    roundtrip(&sink, Request::new(Method::Get, "/a/led"));
}
