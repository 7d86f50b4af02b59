//! IME composition continuity across events and frames.

use thiserror::Error;

use crate::Event;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CompositionState {
  #[default]
  Idle,
  Composing { preedit: String },
}

/// What an event did to the composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompositionStep {
  Started,
  Updated(String),
  /// A `Text` event ended the composition with this committed string.
  Committed(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompositionViolation {
  #[error("composition update {0:?} arrived outside a composition")]
  UpdateWithoutStart(String),
  #[error("composition restarted while preedit {0:?} was pending")]
  Restarted(String),
}

/// Consumer-side tracker for `CompositionStart -> CompositionUpdate* -> Text`.
///
/// There is no explicit end event; the first `Text` after a start commits.
/// Violations are reported and then recovered from: an update outside a
/// composition opens one, and a second start discards the pending preedit.
#[derive(Debug, Clone, Default)]
pub struct CompositionTracker {
  state: CompositionState,
}

impl CompositionTracker {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn state(&self) -> &CompositionState {
    &self.state
  }

  pub fn is_composing(&self) -> bool {
    matches!(self.state, CompositionState::Composing { .. })
  }

  pub fn observe(
    &mut self,
    event: &Event,
  ) -> Result<Option<CompositionStep>, CompositionViolation> {
    match event {
      Event::CompositionStart => {
        let previous = std::mem::replace(&mut self.state, CompositionState::Composing {
          preedit: String::new(),
        });
        match previous {
          CompositionState::Composing { preedit } => Err(CompositionViolation::Restarted(preedit)),
          CompositionState::Idle => Ok(Some(CompositionStep::Started)),
        }
      },
      Event::CompositionUpdate(text) => {
        match &mut self.state {
          CompositionState::Composing { preedit } => {
            preedit.clone_from(text);
            Ok(Some(CompositionStep::Updated(text.clone())))
          },
          CompositionState::Idle => {
            self.state = CompositionState::Composing {
              preedit: text.clone(),
            };
            Err(CompositionViolation::UpdateWithoutStart(text.clone()))
          },
        }
      },
      Event::Text(text) if self.is_composing() => {
        self.state = CompositionState::Idle;
        Ok(Some(CompositionStep::Committed(text.clone())))
      },
      _ => Ok(None),
    }
  }

  pub fn reset(&mut self) {
    self.state = CompositionState::Idle;
  }
}
