use crate::error::{NormalizeError, Result};
use crate::{CID_KEY, LEGACY_KEY, NORMALIZED_PREFIX};
use cid::multibase::Base;
use cid::Cid;
use serde_json::{Map, Value};

/// A file entry as sent by the main application. Only `base58` is read;
/// every other key is carried through untouched.
pub type FileDescriptor = Map<String, Value>;

/// Number of leading characters of the CIDv1 text replaced by the prefix.
const SPLICE_LEN: usize = 5;

/// Parse `text`, lift it to CIDv1 and splice in the `bafkr` prefix.
///
/// The first five characters of the base32 rendering (`bafyb` for a dag-pb
/// CIDv0) are dropped and replaced. For sha2-256 input this is the same
/// string as the raw-codec CIDv1 over the same multihash.
pub fn normalize_cid(text: &str) -> std::result::Result<String, cid::Error> {
    let v1 = Cid::try_from(text)?.into_v1()?;
    let rendered = v1.to_string_of_base(Base::Base32Lower)?;
    let tail = rendered.get(SPLICE_LEN..).ok_or(cid::Error::InputTooShort)?;
    Ok(format!("{NORMALIZED_PREFIX}{tail}"))
}

/// Replace the `base58` key of one descriptor with its normalized `cid`.
pub fn normalize_descriptor(index: usize, mut descriptor: FileDescriptor) -> Result<FileDescriptor> {
    let legacy = match descriptor.remove(LEGACY_KEY) {
        Some(Value::String(s)) => s,
        Some(other) => {
            return Err(NormalizeError::invalid(
                index,
                format!("`{LEGACY_KEY}` must be a string, got {other}"),
            ))
        }
        None => return Err(NormalizeError::invalid(index, format!("missing `{LEGACY_KEY}`"))),
    };
    if legacy.is_empty() {
        return Err(NormalizeError::invalid(index, format!("`{LEGACY_KEY}` is empty")));
    }
    let cid = normalize_cid(&legacy)
        .map_err(|e| NormalizeError::invalid(index, format!("{legacy:?} is not a CID: {e}")))?;
    descriptor.insert(CID_KEY.to_string(), Value::String(cid));
    Ok(descriptor)
}

/// Normalize a whole batch, preserving order.
///
/// All-or-nothing: the first invalid entry fails the batch and no partial
/// output is produced.
pub fn normalize(files: Vec<Value>) -> Result<Vec<FileDescriptor>> {
    files
        .into_iter()
        .enumerate()
        .map(|(index, file)| match file {
            Value::Object(descriptor) => normalize_descriptor(index, descriptor),
            other => Err(NormalizeError::invalid(
                index,
                format!("descriptor must be an object, got {other}"),
            )),
        })
        .collect()
}
