/// Types for differentiating between fields
pub type SessionID = u32;
pub type Port = u16;
