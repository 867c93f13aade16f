pub mod terminal;

use std::sync::Arc;
use crate::shared_state::SharedState;
use async_trait::async_trait;



/// Frontend implementations expose their event loop through this method,
/// so that they can be run as a task like every other component.
#[async_trait]
pub trait Frontend {
    async fn main(self, shared_state: Arc<SharedState>);
}



/// Nice wrapper to abstract away Frontend trait.
pub async fn main(frontend: impl Frontend, shared_state: Arc<SharedState>) {
    frontend.main(shared_state).await
}
