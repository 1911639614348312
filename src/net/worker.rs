//! Hintergrund-Thread für Netzwerk-Roundtrips.
//!
//! Der UI-Thread schickt `ApiRequest`s und pollt pro Frame die `ApiReply`s;
//! der Worker selbst verändert keinen Anwendungszustand.

use super::api::{ApiRequest, HttpResponse};
use super::transport::{Transport, TransportError};
use std::cell::Cell;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

/// Antwort auf einen `ApiRequest`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    /// Ursprünglicher Request
    pub request: ApiRequest,
    /// HTTP-Antwort oder Netzwerkfehler
    pub result: Result<HttpResponse, TransportError>,
}

enum WorkerCommand {
    Send(ApiRequest),
    Shutdown,
}

/// Ein Worker-Thread mit Request- und Reply-Kanal.
pub struct NetworkWorker {
    sender: mpsc::Sender<WorkerCommand>,
    replies: mpsc::Receiver<ApiReply>,
    handle: Option<JoinHandle<()>>,
    /// Gesendete, noch nicht abgeholte Requests
    pending: Cell<usize>,
}

impl NetworkWorker {
    /// Startet den Worker mit dem gegebenen Transport.
    pub fn spawn<T>(transport: T) -> std::io::Result<Self>
    where
        T: Transport + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<WorkerCommand>();
        let (reply_tx, reply_rx) = mpsc::channel::<ApiReply>();
        let handle = thread::Builder::new()
            .name("tsp-network".into())
            .spawn(move || worker_loop(transport, rx, reply_tx))?;

        Ok(Self {
            sender: tx,
            replies: reply_rx,
            handle: Some(handle),
            pending: Cell::new(0),
        })
    }

    /// Reiht einen Request ein.
    pub fn send(&self, request: ApiRequest) -> Result<(), TransportError> {
        self.sender
            .send(WorkerCommand::Send(request))
            .map_err(|_| TransportError::Disconnected)?;
        self.pending.set(self.pending.get() + 1);
        Ok(())
    }

    /// Liefert eine fertige Antwort, falls vorhanden (nicht blockierend).
    pub fn try_recv(&self) -> Option<ApiReply> {
        self.replies.try_recv().ok().inspect(|_| self.mark_received())
    }

    /// Wartet blockierend auf die nächste Antwort.
    pub fn recv(&self) -> Option<ApiReply> {
        self.replies.recv().ok().inspect(|_| self.mark_received())
    }

    /// Anzahl gesendeter Requests ohne abgeholte Antwort.
    pub fn pending(&self) -> usize {
        self.pending.get()
    }

    fn mark_received(&self) {
        self.pending.set(self.pending.get().saturating_sub(1));
    }

    /// Beendet den Worker. Ein Request ohne Timeout kann beliebig lange hängen;
    /// dann wird der Thread abgekoppelt statt gejoint.
    fn shutdown(&mut self) {
        let _ = self.sender.send(WorkerCommand::Shutdown);
        if self.pending.get() > 0 {
            log::warn!(
                "{} Request(s) offen, Netzwerk-Worker wird abgekoppelt",
                self.pending.get()
            );
            self.handle.take();
            return;
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Netzwerk-Worker ist abgestürzt");
            }
        }
    }
}

impl Drop for NetworkWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop<T: Transport>(
    mut transport: T,
    rx: mpsc::Receiver<WorkerCommand>,
    reply_tx: mpsc::Sender<ApiReply>,
) {
    while let Ok(command) = rx.recv() {
        let request = match command {
            WorkerCommand::Send(request) => request,
            WorkerCommand::Shutdown => return,
        };

        let result = transport.request(&request.to_http());
        if let Err(e) = &result {
            log::warn!("Request für Problem {} fehlgeschlagen: {}", request.index(), e);
        }

        if reply_tx.send(ApiReply { request, result }).is_err() {
            return;
        }
    }
}
