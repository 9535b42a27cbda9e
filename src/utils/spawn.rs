//! Task spawning on the browser event loop.

use futures::future::LocalFutureObj;
use futures::task::{LocalSpawn, SpawnError};

/// [`LocalSpawn`] backed by `wasm_bindgen_futures::spawn_local`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSpawner;

impl LocalSpawn for BrowserSpawner {
    fn spawn_local_obj(&self, future: LocalFutureObj<'static, ()>) -> Result<(), SpawnError> {
        wasm_bindgen_futures::spawn_local(future);
        Ok(())
    }
}
