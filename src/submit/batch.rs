use crate::submit::SubmitError;

/// Splits a URL list into contiguous batches of at most `batch_size`
///
/// Order is preserved, so concatenating the batches gives back the input.
///
/// # Examples
///
/// ```
/// use indexnow_pipeline::submit::batch_urls;
///
/// let urls: Vec<String> = (0..25).map(|i| format!("https://example.com/{}/", i)).collect();
/// let batches = batch_urls(&urls, 10).unwrap();
/// assert_eq!(batches.iter().map(Vec::len).collect::<Vec<_>>(), vec![10, 10, 5]);
/// ```
pub fn batch_urls<T: Clone>(urls: &[T], batch_size: usize) -> Result<Vec<Vec<T>>, SubmitError> {
    if batch_size == 0 {
        return Err(SubmitError::InvalidBatchSize(batch_size));
    }

    Ok(urls.chunks(batch_size).map(<[T]>::to_vec).collect())
}
