use crate::{CommandChannel, CoreError, CoreResult};

use std::{
    io::{self, ErrorKind},
    net::{IpAddr, SocketAddr},
    panic::Location,
};

use error_location::ErrorLocation;
use tokio::{net::UdpSocket, sync::watch, task::JoinHandle};
use tracing::{debug, error, info, instrument};

/// Largest payload a single UDP datagram can carry.
pub const MAX_DATAGRAM_SIZE: usize = 65_535;

/// Anything the receive loop can read datagrams from.
pub(crate) trait DatagramSource: Send + Sync + 'static {
    /// Receive one datagram into `buf`, returning its length and sender.
    fn recv_from(
        &self,
        buf: &mut [u8],
    ) -> impl Future<Output = io::Result<(usize, SocketAddr)>> + Send;
}

impl DatagramSource for UdpSocket {
    fn recv_from(
        &self,
        buf: &mut [u8],
    ) -> impl Future<Output = io::Result<(usize, SocketAddr)>> + Send {
        UdpSocket::recv_from(self, buf)
    }
}

/// Owns the bound UDP socket and the task that feeds received commands into
/// a [`CommandChannel`].
///
/// Each datagram becomes one command: its payload decoded as UTF-8, with
/// invalid sequences replaced rather than rejected. The receive task is
/// aborted when the listener is dropped, which releases the socket.
#[derive(Debug)]
pub struct DatagramListener {
    local_addr: SocketAddr,
    shutdown_tx: watch::Sender<bool>,
    task: Option<JoinHandle<CoreResult<()>>>,
}

impl DatagramListener {
    /// Bind `bind_address:port` and start receiving on the current tokio runtime.
    ///
    /// Passing port 0 lets the OS pick a port; [`Self::port`] reports it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::BindFailed`] if the socket cannot be bound.
    #[instrument(skip(channel))]
    pub async fn start(
        bind_address: IpAddr,
        port: u16,
        channel: CommandChannel<String>,
    ) -> CoreResult<Self> {
        let address = SocketAddr::new(bind_address, port);

        let socket = UdpSocket::bind(address)
            .await
            .map_err(|source| CoreError::BindFailed {
                address,
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        let local_addr = socket.local_addr().map_err(|source| CoreError::BindFailed {
            address,
            source,
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(local_addr = %local_addr, "Listening for UDP commands");

        Ok(Self::spawn(socket, local_addr, channel))
    }

    /// Start the receive task over an already bound `source`.
    pub(crate) fn spawn<S: DatagramSource>(
        source: S,
        local_addr: SocketAddr,
        channel: CommandChannel<String>,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(receive_loop(source, local_addr.port(), channel, shutdown_rx));

        Self {
            local_addr,
            shutdown_tx,
            task: Some(task),
        }
    }

    /// Port the socket is bound to.
    pub fn port(&self) -> u16 {
        self.local_addr.port()
    }

    /// Full local address of the socket.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Wait until the receive task ends on its own or after [`Self::stop`].
    ///
    /// Cancel-safe, so it can sit in a `tokio::select!` loop. Returns
    /// immediately once the task's result has been collected.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ReceiveFailed`] when a socket error ended the loop.
    pub async fn stopped(&mut self) -> CoreResult<()> {
        let Some(task) = self.task.as_mut() else {
            return Ok(());
        };

        let joined = task.await;
        self.task = None;

        joined.map_err(|e| CoreError::ListenerTaskFailed {
            reason: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?
    }

    /// Stop receiving and release the socket.
    ///
    /// # Errors
    ///
    /// Surfaces a receive failure that ended the loop before the stop request.
    #[instrument(skip(self))]
    pub async fn stop(mut self) -> CoreResult<()> {
        // Receiver already gone means the task has finished.
        let _ = self.shutdown_tx.send(true);
        let result = self.stopped().await;

        info!(port = self.port(), "UDP listener stopped");

        result
    }
}

impl Drop for DatagramListener {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!(port = self.local_addr.port(), "Receive task aborted on drop");
        }
    }
}

async fn receive_loop<S: DatagramSource>(
    source: S,
    port: u16,
    channel: CommandChannel<String>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> CoreResult<()> {
    let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];

    loop {
        tokio::select! {
            _ = shutdown_rx.changed() => {
                debug!(port, "Receive loop shutting down");
                return Ok(());
            }

            received = source.recv_from(&mut buf) => {
                handle_received(received, &buf, port, &channel)?;
            }
        }
    }
}

/// Enqueue one received datagram, or decide whether a receive error ends the loop.
#[track_caller]
fn handle_received(
    received: io::Result<(usize, SocketAddr)>,
    buf: &[u8],
    port: u16,
    channel: &CommandChannel<String>,
) -> CoreResult<()> {
    match received {
        Ok((len, peer)) => {
            let command = String::from_utf8_lossy(&buf[..len]).into_owned();
            debug!(peer = %peer, len, "Datagram received");
            channel.enqueue(command);
            Ok(())
        }
        // Windows surfaces ICMP port-unreachable from earlier sends here
        Err(e) if e.kind() == ErrorKind::ConnectionReset => {
            debug!(port, error = %e, "Ignoring connection reset on UDP socket");
            Ok(())
        }
        Err(source) => {
            error!(port, error = %source, "UDP receive failed, listener stopped");
            Err(CoreError::ReceiveFailed {
                port,
                source,
                location: ErrorLocation::from(Location::caller()),
            })
        }
    }
}
