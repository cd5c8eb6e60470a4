//! ISO 11783 / J1939 address claiming and ISO request handling.
//!
//! The manager is sans-IO: it is fed received claims and requests together
//! with the current time, and returns the records to transmit plus any state
//! transition the caller should know about. The caller owns the bus and the
//! clock.
//!
//! Procedure:
//! 1. `start` broadcasts a claim for the preferred address and opens a
//!    250 ms contention window.
//! 2. `poll` promotes the claim once the window passes without a conflict.
//! 3. A claim from another node for our address is arbitrated on NAME: the
//!    lower NAME keeps the address. The loser moves to the next free address
//!    when it is arbitrary address capable, otherwise it announces it cannot
//!    claim from the null address.
use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::can_id::{BROADCAST_ADDRESS, CanId, NULL_ADDRESS};
use crate::iso_name::IsoName;
use crate::pgns;
use crate::record::{FieldValue, Fields, PgnRecord};

/// Contention window after sending a claim.
pub const CLAIM_WINDOW: Duration = Duration::from_millis(250);
/// Highest address a node may claim; 252-253 are reserved.
pub const MAX_CLAIMABLE_ADDRESS: u8 = 251;

/// Product information announced in PGN 126996.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInfo {
    /// Raw protocol version, 1300 means 1.300.
    pub nmea2000_version: u16,
    pub product_code: u16,
    pub model_id: String,
    pub software_version: String,
    pub model_version: String,
    pub model_serial: String,
    pub certification_level: u8,
    pub load_equivalency: u8,
}

impl ProductInfo {
    pub fn record(&self) -> PgnRecord {
        PgnRecord::new(pgns::PRODUCT_INFORMATION)
            .with_field(
                "NMEA 2000 Version",
                FieldValue::Float(self.nmea2000_version as f64 / 1000.0),
            )
            .with_field("Product Code", FieldValue::Unsigned(self.product_code as u64))
            .with_field("Model ID", FieldValue::Text(self.model_id.clone()))
            .with_field(
                "Software Version Code",
                FieldValue::Text(self.software_version.clone()),
            )
            .with_field("Model Version", FieldValue::Text(self.model_version.clone()))
            .with_field("Model Serial Code", FieldValue::Text(self.model_serial.clone()))
            .with_field(
                "Certification Level",
                FieldValue::Unsigned(self.certification_level as u64),
            )
            .with_field(
                "Load Equivalency",
                FieldValue::Unsigned(self.load_equivalency as u64),
            )
    }
}

/// Everything the bus needs to know about this node.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceDescriptor {
    pub name: IsoName,
    pub preferred_address: u8,
    pub product: ProductInfo,
    pub transmit_pgns: Vec<u32>,
    pub receive_pgns: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimState {
    Unclaimed,
    Claiming { address: u8, deadline: Instant },
    Claimed { address: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The contention window passed; the address is ours.
    Claimed(u8),
    /// Another node with a higher NAME claimed our address and was answered.
    Defended(u8),
    /// We lost our address and are claiming another one.
    Yielded { from: u8, to: u8 },
    /// No address left; we now send from the null address.
    Unclaimed,
}

/// What the caller should do after feeding the manager.
#[derive(Debug, Default, PartialEq)]
pub struct ClaimOutput {
    /// Records to send, in order. Their source address is already set.
    pub transmit: Vec<PgnRecord>,
    pub transition: Option<Transition>,
}

impl ClaimOutput {
    pub fn is_empty(&self) -> bool {
        self.transmit.is_empty() && self.transition.is_none()
    }
}

pub struct AddressClaimManager {
    device: DeviceDescriptor,
    state: ClaimState,
    /// Addresses claimed by other nodes.
    occupied: HashMap<u8, IsoName>,
}

impl AddressClaimManager {
    pub fn new(device: DeviceDescriptor) -> Self {
        Self {
            device,
            state: ClaimState::Unclaimed,
            occupied: HashMap::new(),
        }
    }

    pub fn device(&self) -> &DeviceDescriptor {
        &self.device
    }

    pub fn state(&self) -> ClaimState {
        self.state
    }

    /// The claimed address, once the contention window has passed.
    pub fn address(&self) -> Option<u8> {
        match self.state {
            ClaimState::Claimed { address } => Some(address),
            _ => None,
        }
    }

    /// Address to use as the source of outgoing frames.
    pub fn source_address(&self) -> u8 {
        match self.state {
            ClaimState::Claiming { address, .. } | ClaimState::Claimed { address } => address,
            ClaimState::Unclaimed => NULL_ADDRESS,
        }
    }

    /// Begin (or restart) claiming the preferred address.
    pub fn start(&mut self, now: Instant) -> ClaimOutput {
        self.occupied.clear();
        let address = self.device.preferred_address.min(MAX_CLAIMABLE_ADDRESS);
        info!("Claiming address {} with NAME {}", address, self.device.name);
        self.state = ClaimState::Claiming {
            address,
            deadline: now + CLAIM_WINDOW,
        };
        ClaimOutput {
            transmit: vec![self.device.name.claim_record(address)],
            transition: None,
        }
    }

    /// Advance timers.
    pub fn poll(&mut self, now: Instant) -> ClaimOutput {
        match self.state {
            ClaimState::Claiming { address, deadline } if now >= deadline => {
                info!("Address {} claimed", address);
                self.state = ClaimState::Claimed { address };
                ClaimOutput {
                    transmit: Vec::new(),
                    transition: Some(Transition::Claimed(address)),
                }
            }
            _ => ClaimOutput::default(),
        }
    }

    /// Feed a received message; claims and ISO requests are acted on, other
    /// PGNs are ignored.
    pub fn handle_message(&mut self, id: CanId, payload: &[u8], now: Instant) -> ClaimOutput {
        match id.pgn() {
            pgns::ISO_ADDRESS_CLAIM => match IsoName::from_claim_payload(payload) {
                Some(name) => self.handle_address_claim(id.source_address(), name, now),
                None => {
                    warn!(
                        "Address claim from {} with {} byte payload",
                        id.source_address(),
                        payload.len()
                    );
                    ClaimOutput::default()
                }
            },
            pgns::ISO_REQUEST if payload.len() >= 3 => {
                let requested = u32::from_le_bytes([payload[0], payload[1], payload[2], 0]);
                self.handle_iso_request(id.source_address(), id.destination(), requested)
            }
            _ => ClaimOutput::default(),
        }
    }

    /// Arbitrate a claim sent by another node.
    pub fn handle_address_claim(&mut self, source: u8, name: IsoName, now: Instant) -> ClaimOutput {
        if name == self.device.name {
            return ClaimOutput::default();
        }
        self.occupied.retain(|_, occupant| *occupant != name);
        if source > MAX_CLAIMABLE_ADDRESS {
            debug!("Node {} cannot claim an address", name);
            return ClaimOutput::default();
        }
        self.occupied.insert(source, name);

        let current = match self.state {
            ClaimState::Claiming { address, .. } | ClaimState::Claimed { address } => address,
            ClaimState::Unclaimed => return ClaimOutput::default(),
        };
        if source != current {
            return ClaimOutput::default();
        }

        if self.device.name < name {
            info!("Defending address {} against {}", current, name);
            return ClaimOutput {
                transmit: vec![self.device.name.claim_record(current)],
                transition: Some(Transition::Defended(current)),
            };
        }

        match self.next_free_address(current) {
            Some(next) if self.device.name.is_arbitrary_address_capable() => {
                warn!("Lost address {} to {}, claiming {}", current, name, next);
                self.state = ClaimState::Claiming {
                    address: next,
                    deadline: now + CLAIM_WINDOW,
                };
                ClaimOutput {
                    transmit: vec![self.device.name.claim_record(next)],
                    transition: Some(Transition::Yielded {
                        from: current,
                        to: next,
                    }),
                }
            }
            _ => {
                warn!("Lost address {} to {}, no address left to claim", current, name);
                self.state = ClaimState::Unclaimed;
                ClaimOutput {
                    transmit: vec![self.device.name.claim_record(NULL_ADDRESS)],
                    transition: Some(Transition::Unclaimed),
                }
            }
        }
    }

    /// Answer an ISO request (PGN 59904).
    pub fn handle_iso_request(&mut self, requester: u8, destination: u8, pgn: u32) -> ClaimOutput {
        let source = self.source_address();
        if destination != BROADCAST_ADDRESS && destination != source {
            return ClaimOutput::default();
        }

        if pgn == pgns::ISO_ADDRESS_CLAIM {
            return ClaimOutput {
                transmit: vec![self.device.name.claim_record(source)],
                transition: None,
            };
        }

        // Only a claimed node may talk about anything else.
        let Some(address) = self.address() else {
            return ClaimOutput::default();
        };

        let mut transmit = match pgn {
            pgns::PRODUCT_INFORMATION => vec![self.device.product.record()],
            pgns::PGN_LIST => vec![
                pgn_list("Transmit PGN list", &self.device.transmit_pgns),
                pgn_list("Receive PGN list", &self.device.receive_pgns),
            ],
            _ if destination == address => {
                debug!("NAK for request of PGN {} from {}", pgn, requester);
                vec![
                    PgnRecord::new(pgns::ISO_ACKNOWLEDGEMENT)
                        .with_field("Control", FieldValue::Lookup("NAK".to_string()))
                        .with_field("PGN", FieldValue::Unsigned(pgn as u64))
                        .to_destination(requester),
                ]
            }
            _ => Vec::new(),
        };
        for record in &mut transmit {
            record.source = address;
        }
        ClaimOutput {
            transmit,
            transition: None,
        }
    }

    fn next_free_address(&self, current: u8) -> Option<u8> {
        ((current as u16 + 1)..=MAX_CLAIMABLE_ADDRESS as u16)
            .chain(0..current as u16)
            .map(|address| address as u8)
            .find(|address| !self.occupied.contains_key(address))
    }
}

fn pgn_list(function: &str, pgns: &[u32]) -> PgnRecord {
    let list = pgns
        .iter()
        .map(|pgn| Fields::from([("PGN".to_string(), FieldValue::Unsigned(*pgn as u64))]))
        .collect();
    PgnRecord::new(pgns::PGN_LIST)
        .with_field("Function Code", FieldValue::Lookup(function.to_string()))
        .with_field("list", FieldValue::List(list))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;
    use crate::fast_packet::SequenceCounter;
    use crate::frame::CanFrame;

    fn product() -> ProductInfo {
        ProductInfo {
            nmea2000_version: 1300,
            product_code: 668,
            model_id: "Anchor Alarm".to_string(),
            software_version: "1.0".to_string(),
            model_version: "1.0".to_string(),
            model_serial: "123456".to_string(),
            certification_level: 0,
            load_equivalency: 1,
        }
    }

    fn device(unique_number: u32, preferred_address: u8) -> DeviceDescriptor {
        DeviceDescriptor {
            name: IsoName::builder()
                .unique_number(unique_number)
                .manufacturer_code(2046)
                .device_function(190)
                .device_class(20)
                .industry_group(4)
                .arbitrary_address_capable(true)
                .build(),
            preferred_address,
            product: product(),
            transmit_pgns: vec![127501, 127502, 126983],
            receive_pgns: vec![59904, 60928],
        }
    }

    fn claimed(unique_number: u32, address: u8, now: Instant) -> AddressClaimManager {
        let mut manager = AddressClaimManager::new(device(unique_number, address));
        manager.start(now);
        manager.poll(now + CLAIM_WINDOW);
        assert_eq!(manager.address(), Some(address));
        manager
    }

    fn to_frames(records: &[PgnRecord]) -> Vec<CanFrame> {
        let mut counter = SequenceCounter::new();
        records
            .iter()
            .flat_map(|record| codec::encode(record, &mut counter).unwrap())
            .collect()
    }

    #[test]
    fn test_claim_after_window() {
        let now = Instant::now();
        let mut manager = AddressClaimManager::new(device(1, 66));
        assert_eq!(manager.source_address(), NULL_ADDRESS);

        let output = manager.start(now);
        assert_eq!(output.transmit.len(), 1);
        assert_eq!(output.transmit[0].pgn, 60928);
        assert_eq!(output.transmit[0].source, 66);
        assert_eq!(manager.address(), None);
        assert_eq!(manager.source_address(), 66);

        assert!(manager.poll(now + Duration::from_millis(100)).is_empty());
        let output = manager.poll(now + CLAIM_WINDOW);
        assert_eq!(output.transition, Some(Transition::Claimed(66)));
        assert_eq!(manager.address(), Some(66));
    }

    #[test]
    fn test_lower_name_defends() {
        let now = Instant::now();
        let mut manager = claimed(1, 66, now);
        let rival = device(2, 66).name;
        let output = manager.handle_address_claim(66, rival, now);
        assert_eq!(output.transition, Some(Transition::Defended(66)));
        assert_eq!(output.transmit[0].source, 66);
        assert_eq!(manager.address(), Some(66));
    }

    #[test]
    fn test_higher_name_yields_to_next_free_address() {
        let now = Instant::now();
        let mut manager = claimed(5, 66, now);
        // 67 is already taken by a third node.
        manager.handle_address_claim(67, IsoName::from_raw(0x42), now);

        let winner = device(1, 66).name;
        let output = manager.handle_address_claim(66, winner, now);
        assert_eq!(output.transition, Some(Transition::Yielded { from: 66, to: 68 }));
        assert_eq!(output.transmit[0].source, 68);
        assert_eq!(manager.address(), None);

        let output = manager.poll(now + CLAIM_WINDOW);
        assert_eq!(output.transition, Some(Transition::Claimed(68)));
    }

    #[test]
    fn test_not_arbitrary_capable_goes_unclaimed() {
        let now = Instant::now();
        let mut descriptor = device(5, 66);
        descriptor.name = IsoName::from_raw(descriptor.name.raw() & !(1u64 << 63));
        let mut manager = AddressClaimManager::new(descriptor);
        manager.start(now);

        let output = manager.handle_address_claim(66, IsoName::from_raw(1), now);
        assert_eq!(output.transition, Some(Transition::Unclaimed));
        assert_eq!(output.transmit[0].source, NULL_ADDRESS);
        assert_eq!(manager.state(), ClaimState::Unclaimed);
        assert_eq!(manager.source_address(), NULL_ADDRESS);
    }

    #[test]
    fn test_claims_for_other_addresses_are_recorded_only() {
        let now = Instant::now();
        let mut manager = claimed(5, 66, now);
        assert!(manager.handle_address_claim(10, IsoName::from_raw(1), now).is_empty());
        assert_eq!(manager.next_free_address(9), Some(11));
    }

    #[test]
    fn test_two_nodes_on_a_simulated_bus() {
        let now = Instant::now();
        let mut a = AddressClaimManager::new(device(1, 66));
        let mut b = AddressClaimManager::new(device(2, 66));

        let claim_a = to_frames(&a.start(now).transmit);
        let claim_b = to_frames(&b.start(now).transmit);

        // Each node sees the other's claim.
        let mut from_b = Vec::new();
        for frame in &claim_a {
            from_b.extend(b.handle_message(frame.id, frame.data(), now).transmit);
        }
        let mut from_a = Vec::new();
        for frame in &claim_b {
            from_a.extend(a.handle_message(frame.id, frame.data(), now).transmit);
        }
        // B re-claims elsewhere; A's defence reaches B afterwards.
        for frame in to_frames(&from_a) {
            b.handle_message(frame.id, frame.data(), now);
        }
        for frame in to_frames(&from_b) {
            a.handle_message(frame.id, frame.data(), now);
        }

        let later = now + CLAIM_WINDOW;
        a.poll(later);
        b.poll(later);
        assert_eq!(a.address(), Some(66));
        assert_eq!(b.address(), Some(67));
    }

    #[test]
    fn test_iso_request_for_address_claim() {
        let now = Instant::now();
        let mut manager = claimed(1, 66, now);
        let output = manager.handle_iso_request(10, BROADCAST_ADDRESS, 60928);
        assert_eq!(output.transmit.len(), 1);
        assert_eq!(output.transmit[0].source, 66);

        let frames = to_frames(&output.transmit);
        assert_eq!(frames[0].data(), &manager.device().name.to_le_bytes());
    }

    #[test]
    fn test_iso_request_for_product_information() {
        let now = Instant::now();
        let mut manager = claimed(1, 66, now);
        let request = CanFrame::new(CanId::new(6, 59904, 10, 66).unwrap(), &[0x14, 0xF0, 0x01]).unwrap();
        let output = manager.handle_message(request.id, request.data(), now);
        assert_eq!(output.transmit.len(), 1);
        let record = &output.transmit[0];
        assert_eq!(record.pgn, 126996);
        assert_eq!(record.source, 66);
        assert_eq!(record.field("Model ID"), Some(&FieldValue::Text("Anchor Alarm".into())));
        assert_eq!(to_frames(&output.transmit).len(), 20);
    }

    #[test]
    fn test_iso_request_for_pgn_list() {
        let now = Instant::now();
        let mut manager = claimed(1, 66, now);
        let output = manager.handle_iso_request(10, 66, 126464);
        assert_eq!(output.transmit.len(), 2);
        assert_eq!(
            output.transmit[0].field("Function Code"),
            Some(&FieldValue::Lookup("Transmit PGN list".into()))
        );
        let Some(FieldValue::List(list)) = output.transmit[1].field("list") else {
            panic!("expected a list");
        };
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_unknown_request_to_us_is_nakked() {
        let now = Instant::now();
        let mut manager = claimed(1, 66, now);
        let output = manager.handle_iso_request(10, 66, 130306);
        assert_eq!(output.transmit.len(), 1);
        let nak = &output.transmit[0];
        assert_eq!(nak.pgn, 59392);
        assert_eq!(nak.destination, 10);
        assert_eq!(nak.field("PGN"), Some(&FieldValue::Unsigned(130306)));

        let frames = to_frames(&output.transmit);
        assert_eq!(frames[0].id.destination(), 10);
        assert_eq!(frames[0].data()[0], 1);

        // Broadcast requests for unsupported PGNs stay unanswered.
        assert!(manager.handle_iso_request(10, BROADCAST_ADDRESS, 130306).is_empty());
    }

    #[test]
    fn test_requests_for_other_nodes_are_ignored() {
        let now = Instant::now();
        let mut manager = claimed(1, 66, now);
        assert!(manager.handle_iso_request(10, 12, 60928).is_empty());
    }

    #[test]
    fn test_repeated_challenges() {
        let now = Instant::now();
        let mut manager = claimed(1, 66, now);
        for unique in 2..10 {
            let output = manager.handle_address_claim(66, device(unique, 66).name, now);
            assert_eq!(output.transition, Some(Transition::Defended(66)));
        }
        assert_eq!(manager.address(), Some(66));
    }
}
