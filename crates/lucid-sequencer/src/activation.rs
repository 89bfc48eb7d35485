//! Boolean activation input for an explainer
//!
//! Parent UI only knows whether an explainer should be running (a modal is
//! open or not). [`ActivationSignal`] turns that level into edges: a rising
//! edge activates the bound script from its first scene, a falling edge
//! deactivates, and repeating the current level does nothing.

use std::sync::Arc;

use lucid_core::Script;
use tracing::debug;

use crate::error::SequencerResult;
use crate::machine::ActivateOutcome;
use crate::sequencer::SequencerHandle;

/// Level-triggered activation of one script on one sequencer
pub struct ActivationSignal {
    handle: SequencerHandle,
    script: Script,
    active: bool,
    on_complete: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl ActivationSignal {
    /// Bind `script` to `handle`; the signal starts low
    pub fn new(handle: SequencerHandle, script: Script) -> Self {
        Self {
            handle,
            script,
            active: false,
            on_complete: None,
        }
    }

    /// Call `on_complete` each time a run plays to the end
    pub fn with_on_complete(mut self, on_complete: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_complete = Some(Arc::new(on_complete));
        self
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    /// Drive the signal to `active`
    ///
    /// Returns the activation outcome on a rising edge and `None` otherwise.
    pub async fn set(&mut self, active: bool) -> SequencerResult<Option<ActivateOutcome>> {
        if active == self.active {
            return Ok(None);
        }
        debug!(lesson = %self.script.title, active, "Activation signal changed");

        let result = if active {
            let outcome = match &self.on_complete {
                Some(on_complete) => {
                    let on_complete = Arc::clone(on_complete);
                    self.handle
                        .activate_with_callback(self.script.clone(), move || on_complete())
                        .await?
                }
                None => self.handle.activate(self.script.clone()).await?,
            };
            Some(outcome)
        } else {
            self.handle.deactivate().await?;
            None
        };

        self.active = active;
        Ok(result)
    }
}
