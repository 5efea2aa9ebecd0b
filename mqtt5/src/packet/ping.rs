//! PINGREQ and PINGRESP packets. Neither carries any field besides `cmd`.

use serde::Serialize;

use super::ControlPacket;
use crate::command::Command;

/// PINGREQ packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PingReq;

impl PingReq {
    pub fn new() -> Self {
        PingReq
    }
}

impl ControlPacket for PingReq {
    const CMD: Command = Command::PingReq;
}

/// PINGRESP packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PingResp;

impl PingResp {
    pub fn new() -> Self {
        PingResp
    }
}

impl ControlPacket for PingResp {
    const CMD: Command = Command::PingResp;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping_cmds() {
        assert_eq!(PingReq::new().cmd(), Command::PingReq);
        assert_eq!(PingResp::new().cmd(), Command::PingResp);
    }
}
