use bytes::{BufMut, Bytes, BytesMut};
use tracing::debug;

use crate::error::{ConfigRecordError, Result};
use crate::region::Region;
use crate::units::{units, Unit};

/// `configurationVersion` of the record.
pub const CONFIG_VERSION: u8 = 0x01;

/// Reserved bits plus `lengthSizeMinusOne = 3` (4-byte length fields).
const LENGTH_SIZE_BYTE: u8 = 0xFC | 0x03;

/// Reserved bits plus one SPS.
const SPS_COUNT_BYTE: u8 = 0xE0 | 0x01;

const PPS_COUNT: u8 = 0x01;

/// AVC decoder configuration record (`avcC`) for one SPS and one PPS.
///
/// ```text
/// ┌─────┬─────────┬────────┬───────┬──────┬──────┬──────────┬─────┬──────┬──────────┬─────┐
/// │ 01  │ profile │ compat │ level │ 0xFF │ 0xE1 │ SPS len  │ SPS │ 0x01 │ PPS len  │ PPS │
/// │     │         │        │       │      │      │ (2B BE)  │     │      │ (2B BE)  │     │
/// └─────┴─────────┴────────┴───────┴──────┴──────┴──────────┴─────┴──────┴──────────┴─────┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfigRecord {
    sps: Bytes,
    pps: Bytes,
}

impl DecoderConfigRecord {
    /// Build a record from raw SPS and PPS units (without start codes).
    pub fn new(
        sps: impl Into<Bytes>,
        pps: impl Into<Bytes>,
    ) -> std::result::Result<Self, ConfigRecordError> {
        let sps = sps.into();
        let pps = pps.into();

        if sps.len() < 4 {
            return Err(ConfigRecordError::SpsTooShort { len: sps.len() });
        }
        for (kind, set) in [("SPS", &sps), ("PPS", &pps)] {
            if set.len() > u16::MAX as usize {
                return Err(ConfigRecordError::ParameterSetTooLarge {
                    kind,
                    size: set.len(),
                });
            }
        }

        Ok(Self { sps, pps })
    }

    /// Extract the SPS and PPS from encoder extradata in Annex-B form.
    ///
    /// The extradata must hold exactly two start-code-delimited units.
    pub fn from_annexb(extradata: &[u8]) -> Result<Self> {
        let found: Vec<Unit> = units(extradata, Region::whole(extradata))?.collect();
        let [sps, pps] = found.as_slice() else {
            return Err(ConfigRecordError::ParameterSetCount { found: found.len() }.into());
        };

        debug!(
            sps_offset = sps.payload_offset,
            sps_len = sps.len,
            pps_offset = pps.payload_offset,
            pps_len = pps.len,
            "parameter sets located"
        );

        Ok(Self::new(
            Bytes::copy_from_slice(&extradata[sps.payload_range()]),
            Bytes::copy_from_slice(&extradata[pps.payload_range()]),
        )?)
    }

    pub fn sps(&self) -> &[u8] {
        &self.sps
    }

    pub fn pps(&self) -> &[u8] {
        &self.pps
    }

    /// `AVCProfileIndication`, copied from the SPS.
    pub fn profile(&self) -> u8 {
        self.sps[1]
    }

    /// `profile_compatibility`, copied from the SPS.
    pub fn compatibility(&self) -> u8 {
        self.sps[2]
    }

    /// `AVCLevelIndication`, copied from the SPS.
    pub fn level(&self) -> u8 {
        self.sps[3]
    }

    /// Size of the encoded record.
    pub fn encoded_len(&self) -> usize {
        8 + self.sps.len() + 3 + self.pps.len()
    }

    /// Append the encoded record to `dst`.
    pub fn encode(&self, dst: &mut BytesMut) {
        dst.reserve(self.encoded_len());
        dst.put_u8(CONFIG_VERSION);
        dst.put_u8(self.profile());
        dst.put_u8(self.compatibility());
        dst.put_u8(self.level());
        dst.put_u8(LENGTH_SIZE_BYTE);
        dst.put_u8(SPS_COUNT_BYTE);
        dst.put_u16(self.sps.len() as u16);
        dst.put_slice(&self.sps);
        dst.put_u8(PPS_COUNT);
        dst.put_u16(self.pps.len() as u16);
        dst.put_slice(&self.pps);
    }

    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode(&mut buf);
        buf.freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const SPS: [u8; 6] = [0x67, 0x64, 0x00, 0x1F, 0xAC, 0xD9];
    const PPS: [u8; 3] = [0x68, 0xEB, 0xE3];

    fn extradata() -> Vec<u8> {
        let mut data = vec![0x00, 0x00, 0x00, 0x01];
        data.extend_from_slice(&SPS);
        data.extend_from_slice(&[0x00, 0x00, 0x00, 0x01]);
        data.extend_from_slice(&PPS);
        data
    }

    #[test]
    fn extracts_parameter_sets() {
        let record = DecoderConfigRecord::from_annexb(&extradata()).unwrap();
        assert_eq!(record.sps(), &SPS);
        assert_eq!(record.pps(), &PPS);
        assert_eq!(
            (record.profile(), record.compatibility(), record.level()),
            (0x64, 0x00, 0x1F)
        );
    }

    #[test]
    fn encodes_record_layout() {
        let record = DecoderConfigRecord::new(SPS.to_vec(), PPS.to_vec()).unwrap();
        let bytes = record.to_bytes();

        let mut expected = vec![0x01, 0x64, 0x00, 0x1F, 0xFF, 0xE1, 0x00, 0x06];
        expected.extend_from_slice(&SPS);
        expected.extend_from_slice(&[0x01, 0x00, 0x03]);
        expected.extend_from_slice(&PPS);

        assert_eq!(bytes.as_ref(), expected.as_slice());
        assert_eq!(record.encoded_len(), expected.len());
    }

    #[test]
    fn rejects_single_parameter_set() {
        let mut data = vec![0x00, 0x00, 0x00, 0x01];
        data.extend_from_slice(&SPS);

        let err = DecoderConfigRecord::from_annexb(&data).unwrap_err();
        assert!(matches!(
            err,
            Error::ConfigRecord(ConfigRecordError::ParameterSetCount { found: 1 })
        ));
    }

    #[test]
    fn rejects_extra_units() {
        let mut data = extradata();
        data.extend_from_slice(&[0x00, 0x00, 0x00, 0x01, 0x06, 0x05]);

        let err = DecoderConfigRecord::from_annexb(&data).unwrap_err();
        assert!(matches!(
            err,
            Error::ConfigRecord(ConfigRecordError::ParameterSetCount { found: 3 })
        ));
    }

    #[test]
    fn rejects_short_sps() {
        let err = DecoderConfigRecord::new(vec![0x67_u8, 0x64], PPS.to_vec()).unwrap_err();
        assert_eq!(err, ConfigRecordError::SpsTooShort { len: 2 });
    }

    #[test]
    fn rejects_oversized_pps() {
        let err = DecoderConfigRecord::new(SPS.to_vec(), vec![0x68_u8; 70_000]).unwrap_err();
        assert_eq!(
            err,
            ConfigRecordError::ParameterSetTooLarge {
                kind: "PPS",
                size: 70_000
            }
        );
    }
}
