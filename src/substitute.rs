use onig::Regex;

use crate::error::{Result, RewriteError};
use crate::mapping::Mapping;
use crate::patterns;

/// Document text split at every identifier, identifiers kept.
///
/// Even indices hold the surrounding text, odd indices the identifiers, and
/// every identifier is followed by a text fragment (possibly empty).
/// Concatenating the fragments gives back the document.
pub type Fragments = Vec<String>;

/// Characters stripped from the front of each mapping value.
pub const DEFAULT_HEADER_LEN: usize = 7;

#[derive(Debug)]
pub struct CertificateRewriter {
    identifier: Regex,
    certificate: Regex,
    header_len: usize,
}

impl CertificateRewriter {
    pub fn new(header_len: usize) -> Result<Self> {
        Ok(Self {
            identifier: patterns::identifier()?,
            certificate: patterns::certificate()?,
            header_len,
        })
    }

    pub fn split(&self, text: &str) -> Fragments {
        let mut fragments = Vec::new();
        let mut pos = 0;
        for (start, end) in self.identifier.find_iter(text) {
            fragments.push(text[pos..start].to_string());
            fragments.push(text[start..end].to_string());
            pos = end;
        }
        fragments.push(text[pos..].to_string());
        fragments
    }

    /// Applies every mapping entry in mapping order.
    ///
    /// Only the first occurrence of each identifier is rewritten. Stops at the
    /// first key that cannot be applied; fragments touched by earlier keys
    /// stay modified, so callers must discard them on error.
    pub fn replace(&self, fragments: &mut [String], mapping: &Mapping) -> Result<usize> {
        let mut replaced = 0;
        for (key, value) in mapping {
            if let Err(err) = self.replace_one(fragments, key, value) {
                log::error!("Failed for key {}: {}", key, err);
                return Err(err);
            }
            log::info!("Replaced: {}", key);
            replaced += 1;
        }

        log::info!("Total replacements: {}", replaced);
        Ok(replaced)
    }

    /// Splits `text`, applies `mapping` and returns the rewritten fragments
    /// with the number of keys applied.
    pub fn rewrite(&self, text: &str, mapping: &Mapping) -> Result<(Fragments, usize)> {
        let mut fragments = self.split(text);
        log::debug!("Split document into {} fragments", fragments.len());
        let replaced = self.replace(&mut fragments, mapping)?;
        Ok((fragments, replaced))
    }

    fn replace_one(&self, fragments: &mut [String], key: &str, value: &str) -> Result<()> {
        let identifier = patterns::prefixed(key);
        let index = fragments
            .iter()
            .position(|fragment| *fragment == identifier)
            .ok_or_else(|| RewriteError::IdentifierNotFound {
                key: key.to_string(),
            })?;

        let anchor_missing = || RewriteError::AnchorNotFound {
            key: key.to_string(),
        };
        let following = fragments.get_mut(index + 1).ok_or_else(anchor_missing)?;
        let (start, end) = self.certificate.find(following.as_str()).ok_or_else(anchor_missing)?;
        let old_code = following[start..end].to_string();

        let payload = self.payload(key, value)?;
        // every copy of the code inside this fragment, not only the first
        *following = following.replace(&old_code, payload);
        log::debug!("{}: {} -> {}", key, old_code, payload);
        Ok(())
    }

    fn payload<'v>(&self, key: &str, value: &'v str) -> Result<&'v str> {
        if value.chars().count() < self.header_len {
            return Err(RewriteError::MalformedValue {
                key: key.to_string(),
                value: value.to_string(),
                header_len: self.header_len,
            });
        }
        let offset = value
            .char_indices()
            .nth(self.header_len)
            .map_or(value.len(), |(i, _)| i);
        Ok(&value[offset..])
    }
}
