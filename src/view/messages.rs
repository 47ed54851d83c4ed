//! Message side channel used to surface the diagnostic under the cursor

use super::panel::PanelId;

/// The message bar, as seen from the compositor
pub trait MessageSink {
    /// Display `text` in the message bar
    fn message(&mut self, text: &str);

    /// Clear the message bar
    fn reset(&mut self);

    /// A prompt owns the message bar; diagnostics must not overwrite it
    fn has_prompt(&self) -> bool {
        false
    }
}

/// Message bar state kept in memory
#[derive(Debug, Clone, Default)]
pub struct StatusMessages {
    current: Option<String>,
    prompt_active: bool,
    shown: usize,
    resets: usize,
}

impl StatusMessages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn set_prompt_active(&mut self, active: bool) {
        self.prompt_active = active;
    }

    /// How many times a message was displayed
    pub fn shown_count(&self) -> usize {
        self.shown
    }

    /// How many times the bar was cleared
    pub fn reset_count(&self) -> usize {
        self.resets
    }
}

impl MessageSink for StatusMessages {
    fn message(&mut self, text: &str) {
        self.current = Some(text.to_string());
        self.shown += 1;
    }

    fn reset(&mut self) {
        self.current = None;
        self.resets += 1;
    }

    fn has_prompt(&self) -> bool {
        self.prompt_active
    }
}

/// The one mutable piece of state a render pass may touch besides the surface
///
/// It remembers which panel put a gutter message on the message bar and what
/// the message was, so repeated renders do not re-send it and a stale message
/// is cleared once the cursor leaves the diagnostic line.
#[derive(Debug, Default)]
pub struct PresentationContext<M: MessageSink> {
    messages: M,
    gutter_message: Option<(PanelId, String)>,
}

impl<M: MessageSink> PresentationContext<M> {
    pub fn new(messages: M) -> Self {
        Self {
            messages,
            gutter_message: None,
        }
    }

    pub fn messages(&self) -> &M {
        &self.messages
    }

    pub fn messages_mut(&mut self) -> &mut M {
        &mut self.messages
    }

    /// Whether a gutter message is currently on the message bar
    pub fn gutter_message_shown(&self) -> bool {
        self.gutter_message.is_some()
    }

    /// Bring the message bar in line with the diagnostic under the active cursor
    ///
    /// `message` is the marker text on the cursor's line if that line was
    /// rendered in the active panel `panel`, `None` otherwise.
    pub fn sync_gutter_message(&mut self, panel: PanelId, message: Option<&str>) {
        match message {
            Some(text) => {
                let already_shown = matches!(
                    &self.gutter_message,
                    Some((owner, shown)) if *owner == panel && shown == text
                );
                if already_shown || self.messages.has_prompt() {
                    return;
                }
                tracing::debug!("Showing gutter message for panel {:?}: {}", panel, text);
                self.messages.message(text);
                self.gutter_message = Some((panel, text.to_string()));
            }
            None => {
                if self.gutter_message.take().is_some() {
                    tracing::debug!("Clearing gutter message (panel {:?})", panel);
                    self.messages.reset();
                }
            }
        }
    }
}
