//! Resource behavior.
//!
//! A resource's behavior is a [`ResourceHandler`]: one explicit operation
//! per dispatched method instead of a single callback branching on the
//! method name. Reads are synchronous; writes complete through a one-shot
//! [`WriteReply`], which is the stack's only suspension point.

use std::sync::mpsc;

use serde_json::Value;

use crate::Request;

/// One-shot completion signal for a write.
///
/// The dispatcher hands a `WriteReply` to [`ResourceHandler::write`] and
/// waits (with a timeout) for it to be completed. `complete` consumes the
/// reply, so it cannot fire twice; dropping it without completing is
/// observed by the dispatcher as abandonment.
#[derive(Debug)]
pub struct WriteReply {
    tx: mpsc::Sender<Option<Value>>,
}

impl WriteReply {
    /// Create a reply and the receiver the dispatcher waits on.
    #[must_use]
    pub fn channel() -> (Self, mpsc::Receiver<Option<Value>>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }

    /// Complete the write with a representation.
    ///
    /// `None` yields an empty representation in the response entry. If the
    /// dispatcher has already given up waiting, the completion is dropped
    /// silently.
    pub fn complete(self, rep: Option<Value>) {
        let _ = self.tx.send(rep);
    }
}

/// Behavior bound to a registered resource.
///
/// Handlers may be shared across concurrent requests; interior state must
/// provide its own synchronization. Serialization of concurrent writes to
/// one resource is the handler's responsibility, not the dispatcher's.
pub trait ResourceHandler: Send + Sync {
    /// Produce the current representation for a GET.
    ///
    /// `None` means "no representation"; the dispatcher emits an empty
    /// object in that case.
    fn read(&self, req: &Request) -> Option<Value>;

    /// Apply an incoming representation for a PUT.
    ///
    /// The payload has already been parsed and structurally validated.
    /// The handler must complete `reply` exactly once, possibly from
    /// another thread after further work.
    fn write(&self, rep: Value, req: &Request, reply: WriteReply);
}

/// Handler installed when a resource is registered without one.
///
/// Reads yield no representation and writes complete immediately with an
/// empty one.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultHandler;

impl ResourceHandler for DefaultHandler {
    fn read(&self, _req: &Request) -> Option<Value> {
        None
    }

    fn write(&self, _rep: Value, _req: &Request, reply: WriteReply) {
        reply.complete(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Method;
    use serde_json::json;

    #[test]
    fn test_write_reply_is_one_shot() {
        let (reply, rx) = WriteReply::channel();
        reply.complete(Some(json!({"state": true})));
        assert_eq!(rx.recv().unwrap(), Some(json!({"state": true})));
        // reply has been consumed; the channel is now closed
        assert!(rx.recv().is_err());
    }

    #[test]
    fn test_dropped_reply_closes_channel() {
        let (reply, rx) = WriteReply::channel();
        drop(reply);
        assert!(rx.recv().is_err());
    }

    #[test]
    fn test_default_handler() {
        let req = Request::new(Method::Get, "/a/led");
        assert!(DefaultHandler.read(&req).is_none());

        let (reply, rx) = WriteReply::channel();
        DefaultHandler.write(json!({}), &req, reply);
        assert_eq!(rx.recv().unwrap(), None);
    }
}
