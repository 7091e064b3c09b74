mod impls;

use std::fmt;
use std::sync::Arc;

use crate::network::{Network, NetworkInfo};

/// The `Worker` type allows us to interact with any NEAR related networks, such
/// as testnet. It wraps a network implementation behind an [`Arc`] so it stays
/// cheap to clone and hand out to background tasks.
pub struct Worker<T: ?Sized> {
    pub(crate) workspace: Arc<T>,
}

impl<T> Worker<T>
where
    T: Network,
{
    pub(crate) fn new(network: T) -> Self {
        Self {
            workspace: Arc::new(network),
        }
    }
}

impl<T: ?Sized> Clone for Worker<T> {
    fn clone(&self) -> Self {
        Self {
            workspace: Arc::clone(&self.workspace),
        }
    }
}

impl<T> fmt::Debug for Worker<T>
where
    T: fmt::Debug + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Worker")
            .field("workspace", &self.workspace)
            .finish()
    }
}

impl<T> Worker<T>
where
    T: Network + 'static,
{
    pub(crate) fn coerce(self) -> Worker<dyn Network> {
        Worker {
            workspace: self.workspace,
        }
    }
}

impl<T: ?Sized> NetworkInfo for Worker<T>
where
    T: NetworkInfo,
{
    fn info(&self) -> &crate::network::Info {
        self.workspace.info()
    }
}
