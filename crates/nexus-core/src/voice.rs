//! Voice input: a thin toggle over a platform speech-to-text capability.

use crate::{Error, Result};

/// A platform speech-to-text engine.
pub trait SpeechRecognizer {
  /// Whether speech recognition is available at all.
  fn is_supported(&self) -> bool;

  /// Begin continuous listening, discarding any previous transcript.
  fn start(&mut self);

  /// Stop listening and return everything transcribed since `start`.
  fn stop(&mut self) -> String;
}

/// The recognizer used where no speech engine exists (e.g. a terminal).
#[derive(Debug, Default, Clone, Copy)]
pub struct Unsupported;

impl SpeechRecognizer for Unsupported {
  fn is_supported(&self) -> bool { false }

  fn start(&mut self) {}

  fn stop(&mut self) -> String { String::new() }
}

/// Toggles listening and hands back the transcript for submission.
#[derive(Debug, Default)]
pub struct VoiceInput<R> {
  recognizer: R,
  listening:  bool,
}

impl<R: SpeechRecognizer> VoiceInput<R> {
  pub fn new(recognizer: R) -> Self { Self { recognizer, listening: false } }

  pub fn is_listening(&self) -> bool { self.listening }

  /// Start listening, or stop and return the transcript.
  ///
  /// On stop, a non-blank transcript is returned so the caller can submit
  /// it exactly as if it had been typed. Fails without changing state when
  /// the platform has no speech recognition.
  pub fn toggle(&mut self) -> Result<Option<String>> {
    if !self.recognizer.is_supported() {
      return Err(Error::VoiceUnsupported);
    }

    if self.listening {
      self.listening = false;
      let transcript = self.recognizer.stop();
      Ok((!transcript.trim().is_empty()).then_some(transcript))
    } else {
      self.recognizer.start();
      self.listening = true;
      Ok(None)
    }
  }

  /// Stop listening without submitting, e.g. after a typed message is sent.
  pub fn reset(&mut self) {
    if self.listening {
      self.recognizer.stop();
      self.listening = false;
    }
  }
}
