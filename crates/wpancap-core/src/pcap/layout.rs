/// Little-endian magic as written on disk.
pub const MAGIC: [u8; 4] = [0xd4, 0xc3, 0xb2, 0xa1];
pub const VERSION_MAJOR: u64 = 2;
pub const VERSION_MINOR: u64 = 4;
pub const VERSION_PART_BYTES: usize = 2;
pub const GMT_OFFSET: u64 = 0;
pub const ACCURACY: u64 = 0;
pub const SNAPLEN: u64 = 0xFFFF;

pub const FIELD_BYTES: usize = 4;
pub const GLOBAL_HEADER_LEN: usize = 24;
pub const RECORD_HEADER_LEN: usize = 16;

pub const LINKTYPE_IEEE802_15_4_WITHFCS: u32 = 195;
pub const LINKTYPE_IEEE802_15_4_NOFCS: u32 = 230;
