// ============================================================================
// REQUEST TRACKER - Tickets monótonos + cancelación de fetches en vuelo
// ============================================================================
// Cada fetch toma un ticket. Al empezar uno nuevo (o al desmontar la página)
// los anteriores se abortan, y una respuesta con ticket viejo se descarta.
// ============================================================================

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use futures::future::{AbortHandle, Abortable};

#[derive(Default)]
struct TrackerInner {
    current: u64,
    handles: Vec<AbortHandle>,
}

#[derive(Clone, Default)]
pub struct RequestTracker {
    inner: Rc<RefCell<TrackerInner>>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nuevo ticket: aborta todo lo que siguiera en vuelo
    pub fn begin(&self) -> u64 {
        let mut inner = self.inner.borrow_mut();
        for handle in inner.handles.drain(..) {
            handle.abort();
        }
        inner.current += 1;
        inner.current
    }

    pub fn current(&self) -> u64 {
        self.inner.borrow().current
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.current() == ticket
    }

    /// Desmontaje: aborta lo pendiente y deja obsoleto el ticket actual
    pub fn cancel(&self) {
        let aborted = {
            let mut inner = self.inner.borrow_mut();
            inner.current += 1;
            let aborted = inner.handles.len();
            for handle in inner.handles.drain(..) {
                handle.abort();
            }
            aborted
        };
        if aborted > 0 {
            log::debug!("🛑 [TRACKER] {} peticiones canceladas", aborted);
        }
    }

    /// Ejecuta `fut` bajo `ticket`. `None` si fue abortado o quedó obsoleto.
    pub async fn guard<F: Future>(&self, ticket: u64, fut: F) -> Option<F::Output> {
        if !self.is_current(ticket) {
            return None;
        }
        let (handle, registration) = AbortHandle::new_pair();
        self.inner.borrow_mut().handles.push(handle);

        let output = Abortable::new(fut, registration).await.ok()?;
        if self.is_current(ticket) {
            Some(output)
        } else {
            log::debug!("🗑️ [TRACKER] Respuesta obsoleta descartada (ticket {})", ticket);
            None
        }
    }

    /// `begin` + `guard` para el caso de un único fetch
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        let ticket = self.begin();
        self.guard(ticket, fut).await
    }
}
