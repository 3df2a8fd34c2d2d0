use serde_json::{json, Value};
use std::convert::TryFrom;

use crate::common::{EvacuatedData, PeerId};
use crate::communication::channel::DirectEndpoint;
use crate::communication::messages::{HubNotice, PeerRequest};
use crate::errors::{new_err, ErrorKind, NexusError, Result};

/// Transport framing of a protocol message: a `["tag", payload]` tuple plus the endpoints
/// transferred alongside it.
#[derive(Debug)]
pub struct WireFrame {
    pub data: Value,
    pub endpoints: Vec<DirectEndpoint>,
}

impl WireFrame {
    pub fn new(tag: &str, payload: Value) -> WireFrame {
        WireFrame {
            data: json!([tag, payload]),
            endpoints: Vec::new(),
        }
    }

    pub fn with_endpoint(tag: &str, payload: Value, endpoint: DirectEndpoint) -> WireFrame {
        WireFrame {
            data: json!([tag, payload]),
            endpoints: vec![endpoint],
        }
    }

    fn split(self) -> Result<(String, Value, Vec<DirectEndpoint>)> {
        let WireFrame { data, endpoints } = self;
        let mut items = match data {
            Value::Array(items) if items.len() == 2 => items,
            other => {
                return new_err(
                    ErrorKind::InvalidFrame,
                    "Frame is not a [tag, payload] pair".to_string(),
                    other.to_string(),
                )
            }
        };

        let payload = items.pop().unwrap_or(Value::Null);
        let tag = match items.pop() {
            Some(Value::String(tag)) => tag,
            other => {
                return new_err(
                    ErrorKind::InvalidFrame,
                    "Frame tag is not a string".to_string(),
                    format!("{:?}", other),
                )
            }
        };

        Ok((tag, payload, endpoints))
    }
}

fn evacuated_to_value(evacuated: Option<EvacuatedData>) -> Value {
    evacuated.map(EvacuatedData::into_inner).unwrap_or(Value::Null)
}

fn value_to_evacuated(value: Value) -> Option<EvacuatedData> {
    match value {
        Value::Null => None,
        other => Some(EvacuatedData(other)),
    }
}

fn peer_id_payload(tag: &str, payload: &Value) -> Result<PeerId> {
    match payload.as_u64() {
        Some(id) => Ok(id),
        None => new_err(
            ErrorKind::InvalidFrame,
            format!("Payload of '{}' is not a peer id", tag),
            payload.to_string(),
        ),
    }
}

fn expect_endpoints(tag: &str, endpoints: &[DirectEndpoint], expected: usize) -> Result<()> {
    if endpoints.len() != expected {
        return new_err(
            ErrorKind::InvalidFrame,
            format!("'{}' expects {} endpoint(s)", tag, expected),
            format!("got {}", endpoints.len()),
        );
    }
    Ok(())
}

fn single_endpoint(tag: &str, mut endpoints: Vec<DirectEndpoint>) -> Result<DirectEndpoint> {
    expect_endpoints(tag, &endpoints, 1)?;
    match endpoints.pop() {
        Some(endpoint) => Ok(endpoint),
        None => new_err(
            ErrorKind::InvalidFrame,
            format!("'{}' expects an endpoint", tag),
            String::new(),
        ),
    }
}

impl From<HubNotice> for WireFrame {
    fn from(notice: HubNotice) -> Self {
        let tag = notice.tag();
        match notice {
            HubNotice::BecomeMaster { evacuated } => {
                WireFrame::new(tag, evacuated_to_value(evacuated))
            }
            HubNotice::ConnectToMaster {
                master_id,
                endpoint,
            } => WireFrame::with_endpoint(tag, json!(master_id), endpoint),
            HubNotice::AddSlave { slave_id, endpoint } => {
                WireFrame::with_endpoint(tag, json!(slave_id), endpoint)
            }
            HubNotice::RemoveSlave { slave_id } => WireFrame::new(tag, json!(slave_id)),
            HubNotice::ErrorInWorker { error } => WireFrame::new(tag, json!(error)),
        }
    }
}

impl TryFrom<WireFrame> for HubNotice {
    type Error = NexusError;

    fn try_from(frame: WireFrame) -> Result<Self> {
        let (tag, payload, endpoints) = frame.split()?;

        let notice = match tag.as_str() {
            HubNotice::BECOME_MASTER => {
                expect_endpoints(&tag, &endpoints, 0)?;
                HubNotice::BecomeMaster {
                    evacuated: value_to_evacuated(payload),
                }
            }
            HubNotice::CONNECT_TO_MASTER => HubNotice::ConnectToMaster {
                master_id: peer_id_payload(&tag, &payload)?,
                endpoint: single_endpoint(&tag, endpoints)?,
            },
            HubNotice::ADD_SLAVE => HubNotice::AddSlave {
                slave_id: peer_id_payload(&tag, &payload)?,
                endpoint: single_endpoint(&tag, endpoints)?,
            },
            HubNotice::REMOVE_SLAVE => {
                expect_endpoints(&tag, &endpoints, 0)?;
                HubNotice::RemoveSlave {
                    slave_id: peer_id_payload(&tag, &payload)?,
                }
            }
            HubNotice::ERROR_IN_WORKER => {
                expect_endpoints(&tag, &endpoints, 0)?;
                let error = match payload {
                    Value::String(text) => text,
                    other => other.to_string(),
                };
                HubNotice::ErrorInWorker { error }
            }
            unknown => {
                return new_err(
                    ErrorKind::InvalidFrame,
                    "Unknown hub notice tag".to_string(),
                    unknown.to_string(),
                )
            }
        };

        Ok(notice)
    }
}

impl From<PeerRequest> for WireFrame {
    fn from(request: PeerRequest) -> Self {
        let tag = request.tag();
        match request {
            PeerRequest::Dying { evacuated } => WireFrame::new(tag, evacuated_to_value(evacuated)),
        }
    }
}

impl TryFrom<WireFrame> for PeerRequest {
    type Error = NexusError;

    fn try_from(frame: WireFrame) -> Result<Self> {
        let (tag, payload, endpoints) = frame.split()?;

        match tag.as_str() {
            PeerRequest::DYING => {
                expect_endpoints(&tag, &endpoints, 0)?;
                Ok(PeerRequest::Dying {
                    evacuated: value_to_evacuated(payload),
                })
            }
            unknown => new_err(
                ErrorKind::InvalidFrame,
                "Unknown peer request tag".to_string(),
                unknown.to_string(),
            ),
        }
    }
}
