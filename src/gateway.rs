use crate::error::FetchError;

/// Outcome of one completed GET.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fetched {
    pub status: u16,
    pub bytes: usize,
}

impl Fetched {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The endpoint under test. `get` returns once the response body has been read in full.
pub trait Gateway {
    fn get(&mut self, url: &str) -> Result<Fetched, FetchError>;
}

/// Remote gateway reached over HTTP(S) with the shared blocking client.
#[cfg(feature = "reqwest")]
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpGateway;

#[cfg(feature = "reqwest")]
impl Gateway for HttpGateway {
    fn get(&mut self, url: &str) -> Result<Fetched, FetchError> {
        let res = crate::client::BLOCKING_CLIENT.get(url).send()?;
        let status = res.status().as_u16();
        // Drain the body so the timing covers the whole transfer.
        let body = res.bytes()?;
        Ok(Fetched {
            status,
            bytes: body.len(),
        })
    }
}
