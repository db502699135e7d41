use std::{
    future::Future,
    pin::Pin,
    task::{ready, Context, Poll},
};

use futures_util::{SinkExt, StreamExt};
use tokio::{net::TcpStream, sync::mpsc};
use tokio_util::codec::Framed;

use super::{
    codec::{CodecError, ServerCodec},
    models::{Request, Response},
};

/// Future for driving a session socket, forwards decoded requests
/// to the session and writes queued responses to the socket
pub struct SocketFuture {
    /// Socket being acted upon
    io: Framed<TcpStream, ServerCodec>,
    /// Channel for processing received messages
    inbound_tx: Option<mpsc::UnboundedSender<Request>>,
    /// Channel for outbound messages
    outbound_rx: mpsc::UnboundedReceiver<Response>,
    /// Currently accepted outbound item, ready to be written
    buffered_item: Option<Response>,
}

pub type SocketRx = mpsc::UnboundedReceiver<Request>;
pub type SocketTx = mpsc::UnboundedSender<Response>;

impl SocketFuture {
    pub fn new(io: Framed<TcpStream, ServerCodec>) -> (SocketFuture, SocketRx, SocketTx) {
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();

        let future = SocketFuture {
            io,
            inbound_tx: Some(inbound_tx),
            outbound_rx,
            buffered_item: None,
        };

        (future, inbound_rx, outbound_tx)
    }
}

impl Future for SocketFuture {
    type Output = Result<(), CodecError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        // Read messages from the socket
        while let Some(inbound_tx) = &mut this.inbound_tx {
            let msg = match this.io.poll_next_unpin(cx) {
                Poll::Ready(Some(result)) => result?,

                // Socket is already closed, cannot read anything more
                Poll::Ready(None) => return Poll::Ready(Ok(())),

                // Nothing yet, move onto the write polling
                Poll::Pending => break,
            };

            if inbound_tx.send(msg).is_err() {
                // Receiver for messages has dropped, stop reading messages
                this.inbound_tx.take();
                break;
            }
        }

        // Write messages to the socket
        loop {
            if let Some(item) = this.buffered_item.take() {
                // Wait until the socket is ready, keeping the item if it isn't
                if let Poll::Pending = this.io.poll_ready_unpin(cx)? {
                    this.buffered_item = Some(item);
                    return Poll::Pending;
                }

                this.io.start_send_unpin(item)?;
            }

            match this.outbound_rx.poll_recv(cx) {
                // Message ready, set the buffered item
                Poll::Ready(Some(item)) => {
                    this.buffered_item = Some(item);
                }
                // All message senders have dropped, close the socket
                Poll::Ready(None) => {
                    ready!(this.io.poll_close_unpin(cx))?;
                    return Poll::Ready(Ok(()));
                }
                Poll::Pending => {
                    ready!(this.io.poll_flush_unpin(cx))?;
                    return Poll::Pending;
                }
            }
        }
    }
}
