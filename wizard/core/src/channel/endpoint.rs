//! Push channel URL derivation

use url::Url;

use super::traits::ChannelError;
use crate::job::GenerationId;

/// Derive the push channel URL for a generation
///
/// `http` becomes `ws`, `https` becomes `wss`, and `api/ws/{generation_id}`
/// is appended to the base path. The generation ID is percent-encoded as a
/// single path segment.
pub fn push_channel_url(base: &Url, generation_id: &GenerationId) -> Result<Url, ChannelError> {
    let mut url = base.clone();

    let scheme = match base.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => {
            return Err(ChannelError::InvalidUrl(format!(
                "unsupported scheme '{other}'"
            )))
        }
    };
    url.set_scheme(scheme)
        .map_err(|()| ChannelError::InvalidUrl(format!("cannot switch {base} to {scheme}")))?;

    url.path_segments_mut()
        .map_err(|()| ChannelError::InvalidUrl(format!("{base} cannot be a base URL")))?
        .pop_if_empty()
        .extend(["api", "ws", generation_id.as_str()]);

    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}
