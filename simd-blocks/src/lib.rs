#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/media/8f1a9894/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/media/8f1a9894/logo.svg"
)]

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "hazmat")]
pub mod hazmat;

pub mod counter;
pub mod engine;

mod backend;
mod cursor;
mod dispatch;
mod error;
mod flags;
mod layout;
mod stream;
mod subkeys;

pub use crate::{
    backend::{Backend, U8x16, Vector},
    dispatch::{Dispatcher, ProcessFn},
    error::Error,
    flags::ModeFlags,
    layout::{Block64, Block128, BlockLayout},
    stream::BlockStream,
    subkeys::SubkeyTable,
};

/// Size of a native vector register in bytes.
///
/// Every supported backend (SSE2, NEON, portable) uses 128-bit registers.
pub const VECTOR_SIZE: usize = 16;

/// Byte image of one vector register.
pub type RegisterBytes = [u8; VECTOR_SIZE];
