/// Everything that can make a ledger query fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required identifier or range bound was absent. Caller error, no
    /// read was issued.
    #[error("missing parameter: you must provide {0}")]
    MissingParameter(&'static str),

    #[error("invalid block range: start {start} is after end {end}")]
    InvalidBlockRange { start: u64, end: u64 },

    #[error(transparent)]
    InvalidAmount(#[from] number::InvalidAmount),

    #[error("zero amount")]
    ZeroAmount,

    /// A pool of the requested route has a zero reserve.
    #[error("pool at hop {hop} of the route is not liquid")]
    IlliquidRoute { hop: usize },

    #[error("a route needs between one and two hops, got {0}")]
    InvalidRoute(usize),

    #[error("fee of {0} bps is not below 100%")]
    InvalidFee(u32),

    #[error("quotes need at least one significant digit, got {0}")]
    InvalidSignificantDigits(u32),

    /// An external read failed. The underlying error is kept as is.
    #[error("upstream read failed")]
    UpstreamReadFailure(#[source] anyhow::Error),
}

impl Error {
    pub(crate) fn upstream(err: anyhow::Error) -> Self {
        Self::UpstreamReadFailure(err)
    }
}
