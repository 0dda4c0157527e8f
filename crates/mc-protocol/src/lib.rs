use std::io::{self, Read};

use byteorder::ReadBytesExt;
use bytes::{BufMut, Bytes, BytesMut};
use thiserror::Error;

#[cfg(feature = "derive")]
pub use mc_protocol_derive::{Encode, Packet};

// Re-export bytes for use by derived impls
pub use bytes;

mod ident;

pub use ident::{Identifier, strip_namespace};

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("VarInt too large")]
    VarIntTooLarge,
}

pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Clientbound packet IDs of the configuration state (protocol 770, 1.21.5).
pub mod configuration {
    /// Registry Data
    pub const REGISTRY_DATA: u8 = 0x07;
    /// Update Tags
    pub const UPDATE_TAGS: u8 = 0x0D;
}

/// Trait for packets this crate can emit - provides ID and name
pub trait Packet {
    /// The packet ID, written as the first payload byte
    const ID: u8;
    /// The packet name (e.g., "registry_data")
    const NAME: &'static str;
}

/// Writes a value in wire format. Encoding into a growable buffer cannot fail.
pub trait Encode {
    fn encode<B: BufMut>(&self, buf: &mut B);
}

const SEGMENT_BITS: u32 = 0x7F;
const CONTINUE_BIT: u8 = 0x80;

/// Maximum encoded size of a 32-bit VarInt
pub const MAX_VARINT_LEN: usize = 5;

// VarInt encoding/decoding
pub fn write_varint<B: BufMut>(buf: &mut B, mut value: u32) {
    loop {
        if value & !SEGMENT_BITS == 0 {
            buf.put_u8(value as u8);
            return;
        }
        buf.put_u8((value & SEGMENT_BITS) as u8 | CONTINUE_BIT);
        value >>= 7;
    }
}

/// Number of bytes `write_varint` emits for `value`.
pub fn varint_len(mut value: u32) -> usize {
    let mut len = 1;
    while value & !SEGMENT_BITS != 0 {
        value >>= 7;
        len += 1;
    }
    len
}

/// Decodes a VarInt. Generated packets are never parsed at runtime; this
/// exists to verify what the encoders produce.
pub fn read_varint<R: Read>(reader: &mut R) -> Result<u32> {
    let mut result = 0u32;
    let mut shift = 0;
    loop {
        let byte = reader.read_u8()?;
        result |= u32::from(byte & 0x7F) << shift;
        if byte & CONTINUE_BIT == 0 {
            break;
        }
        shift += 7;
        if shift >= 7 * MAX_VARINT_LEN as u32 {
            return Err(ProtocolError::VarIntTooLarge);
        }
    }
    Ok(result)
}

/// Prefix `payload` with its length as a VarInt.
pub fn frame(payload: &[u8]) -> Bytes {
    let length = payload.len() as u32;
    let mut buf = BytesMut::with_capacity(varint_len(length) + payload.len());
    write_varint(&mut buf, length);
    buf.put_slice(payload);
    buf.freeze()
}

/// Encode a packet with its ID into a length-prefixed frame
pub fn encode_packet<P: Packet + Encode>(packet: &P) -> Bytes {
    let mut body = BytesMut::new();
    body.put_u8(P::ID);
    packet.encode(&mut body);
    frame(&body)
}

// Primitive implementations
impl Encode for bool {
    fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(u8::from(*self));
    }
}

impl Encode for u8 {
    fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(*self);
    }
}

// VarInt wrapper type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct VarInt(pub u32);

impl Encode for VarInt {
    fn encode<B: BufMut>(&self, buf: &mut B) {
        write_varint(buf, self.0);
    }
}

impl From<u32> for VarInt {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

impl From<u16> for VarInt {
    fn from(v: u16) -> Self {
        Self(u32::from(v))
    }
}

impl From<VarInt> for u32 {
    fn from(v: VarInt) -> Self {
        v.0
    }
}

// String encoding (length-prefixed with VarInt)
impl Encode for str {
    fn encode<B: BufMut>(&self, buf: &mut B) {
        let bytes = self.as_bytes();
        write_varint(buf, bytes.len() as u32);
        buf.put_slice(bytes);
    }
}

impl Encode for String {
    fn encode<B: BufMut>(&self, buf: &mut B) {
        self.as_str().encode(buf);
    }
}

// Sequence encoding (VarInt count prefix)
impl<T: Encode> Encode for [T] {
    fn encode<B: BufMut>(&self, buf: &mut B) {
        write_varint(buf, self.len() as u32);
        for item in self {
            item.encode(buf);
        }
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode<B: BufMut>(&self, buf: &mut B) {
        self.as_slice().encode(buf);
    }
}
