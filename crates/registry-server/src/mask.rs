//! Log masking.
//!
//! Wraps any [`MakeWriter`] so every formatted log line has the value after a
//! `token:` marker (any of `token:`, `Token:`, `TOKEN:`) replaced with
//! `******` before it reaches the sink. The value runs up to the next comma
//! or line break.

use std::io;

use regex::Regex;
use tracing_subscriber::fmt::MakeWriter;

const TOKEN_PATTERN: &str = r"(token:|TOKEN:|Token:)([^,\n]*)";
const REPLACEMENT: &str = "$1******";

/// A [`MakeWriter`] that masks token values, or passes lines through
/// untouched when built disabled.
pub struct Masking<M> {
  inner:   M,
  pattern: Option<Regex>,
}

impl<M> Masking<M> {
  pub fn new(inner: M, enabled: bool) -> Result<Self, regex::Error> {
    let pattern = enabled.then(|| Regex::new(TOKEN_PATTERN)).transpose()?;
    Ok(Self { inner, pattern })
  }
}

/// Mask every token value in `line`.
pub fn mask(pattern: &Regex, line: &str) -> String {
  pattern.replace_all(line, REPLACEMENT).into_owned()
}

impl<'a, M: MakeWriter<'a>> MakeWriter<'a> for Masking<M> {
  type Writer = MaskingWriter<'a, M::Writer>;

  fn make_writer(&'a self) -> Self::Writer {
    MaskingWriter { inner: self.inner.make_writer(), pattern: self.pattern.as_ref() }
  }
}

pub struct MaskingWriter<'a, W> {
  inner:   W,
  pattern: Option<&'a Regex>,
}

impl<W: io::Write> io::Write for MaskingWriter<'_, W> {
  // The fmt layer hands over each event as one complete buffer.
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    match self.pattern {
      Some(pattern) => {
        let masked = mask(pattern, &String::from_utf8_lossy(buf));
        self.inner.write_all(masked.as_bytes())?;
      }
      None => self.inner.write_all(buf)?,
    }
    Ok(buf.len())
  }

  fn flush(&mut self) -> io::Result<()> { self.inner.flush() }
}

#[cfg(test)]
mod tests {
  use std::sync::{Arc, Mutex};

  use super::*;

  fn pattern() -> Regex { Regex::new(TOKEN_PATTERN).unwrap() }

  #[test]
  fn masks_up_to_the_next_comma() {
    let p = pattern();
    assert_eq!(mask(&p, "token: abc123, user=alice"), "token:******, user=alice");
    assert_eq!(mask(&p, "TOKEN:xyz"), "TOKEN:******");
    assert_eq!(mask(&p, "a Token: 1\nnext"), "a Token:******\nnext");
  }

  #[test]
  fn leaves_other_text_alone() {
    let p = pattern();
    assert_eq!(mask(&p, "tokens are fine, toKen: kept"), "tokens are fine, toKen: kept");
  }

  #[derive(Clone, Default)]
  struct Sink(Arc<Mutex<Vec<u8>>>);

  impl io::Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
      self.0.lock().unwrap().extend_from_slice(buf);
      Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> { Ok(()) }
  }

  fn captured(enabled: bool) -> String {
    let sink = Sink::default();
    let writer = {
      let sink = sink.clone();
      Masking::new(move || sink.clone(), enabled).unwrap()
    };
    let subscriber = tracing_subscriber::fmt()
      .with_writer(writer)
      .with_ansi(false)
      .finish();
    tracing::subscriber::with_default(subscriber, || {
      tracing::info!("login with token: s3cret, from test");
    });
    let bytes = sink.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
  }

  #[test]
  fn subscriber_output_is_masked() {
    let out = captured(true);
    assert!(out.contains("token:******, from test"), "{out}");
    assert!(!out.contains("s3cret"));
  }

  #[test]
  fn disabled_masking_passes_through() {
    assert!(captured(false).contains("token: s3cret"));
  }
}
