//! Offset pagination.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A validated page request: zero-based page index and a positive page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
  page: u32,
  size: u32,
}

impl PageRequest {
  pub const DEFAULT_SIZE: u32 = 20;

  /// Validate raw request values. Negative pages, non-positive sizes and
  /// offsets past `i64::MAX` are rejected with [`Error::Validation`].
  pub fn new(page: i64, size: i64) -> Result<Self> {
    let page = u32::try_from(page)
      .map_err(|_| Error::Validation(format!("page must be non-negative, got {page}")))?;
    let size = u32::try_from(size)
      .ok()
      .filter(|s| *s > 0)
      .ok_or_else(|| Error::Validation(format!("size must be positive, got {size}")))?;
    // Backends bind the offset as a signed 64-bit integer.
    if u64::from(page) * u64::from(size) > i64::MAX as u64 {
      return Err(Error::Validation(format!(
        "page {page} of size {size} is beyond the addressable range"
      )));
    }
    Ok(Self { page, size })
  }

  pub fn page(&self) -> u32 { self.page }

  pub fn size(&self) -> u32 { self.size }

  /// Number of rows to skip.
  pub fn offset(&self) -> u64 { u64::from(self.page) * u64::from(self.size) }
}

impl Default for PageRequest {
  fn default() -> Self { Self { page: 0, size: Self::DEFAULT_SIZE } }
}

/// One page of results plus the total row count of the unpaged query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
  pub content:        Vec<T>,
  pub page:           u32,
  pub size:           u32,
  pub total_elements: u64,
  pub total_pages:    u64,
}

impl<T> Page<T> {
  pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
    let size = u64::from(request.size());
    Self {
      content,
      page: request.page(),
      size: request.size(),
      total_elements,
      total_pages: total_elements.div_ceil(size),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rejects_negative_page() {
    let err = PageRequest::new(-1, 10).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
  }

  #[test]
  fn rejects_zero_and_negative_size() {
    assert!(matches!(PageRequest::new(0, 0), Err(Error::Validation(_))));
    assert!(matches!(PageRequest::new(0, -5), Err(Error::Validation(_))));
  }

  #[test]
  fn rejects_offsets_past_i64() {
    let max = i64::from(u32::MAX);
    assert!(matches!(PageRequest::new(max, max), Err(Error::Validation(_))));

    // Largest u32 page with a size that keeps the offset in range.
    let req = PageRequest::new(max, 1).unwrap();
    assert_eq!(req.offset(), u64::from(u32::MAX));
  }

  #[test]
  fn offset_is_page_times_size() {
    let req = PageRequest::new(3, 25).unwrap();
    assert_eq!(req.offset(), 75);
  }

  #[test]
  fn total_pages_rounds_up() {
    let req = PageRequest::new(0, 4).unwrap();
    let page = Page::new(vec![1, 2, 3, 4], req, 9);
    assert_eq!(page.total_pages, 3);

    let empty: Page<i32> = Page::new(vec![], req, 0);
    assert_eq!(empty.total_pages, 0);
  }

  #[test]
  fn default_request_is_first_page_of_twenty() {
    let req = PageRequest::default();
    assert_eq!((req.page(), req.size()), (0, 20));
  }
}
