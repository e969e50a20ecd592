//! Tool host: versioned JSON envelopes, the command router, and the stdio
//! bridge that carries them.

pub mod channel;
pub mod contract;
pub mod stdio;
