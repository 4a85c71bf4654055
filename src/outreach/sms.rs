//! SMS delivery through the agency's relay, which subscribes to a ZeroMQ
//! PUB socket and forwards each JSON message to the SMS provider.

use std::sync::Mutex;
use std::time::Duration;

use crate::outreach::{DeliveryError, OutgoingSms, SmsGateway};

/// PUB sockets drop messages published before the peer connection is up.
const CONNECT_SETTLE: Duration = Duration::from_millis(250);

pub struct ZmqSmsGateway {
    socket: Mutex<zmq::Socket>,
}

impl ZmqSmsGateway {
    pub fn connect(endpoint: &str) -> Result<Self, DeliveryError> {
        let context = zmq::Context::new();
        let socket = context
            .socket(zmq::PUB)
            .map_err(|e| DeliveryError::Transport(format!("Cannot create zmq socket: {e}")))?;
        socket
            .connect(endpoint)
            .map_err(|e| DeliveryError::Transport(format!("Cannot connect to {endpoint}: {e}")))?;
        std::thread::sleep(CONNECT_SETTLE);

        Ok(Self {
            socket: Mutex::new(socket),
        })
    }
}

impl SmsGateway for ZmqSmsGateway {
    fn send_sms(&self, sms: &OutgoingSms) -> Result<(), DeliveryError> {
        let payload = serde_json::to_vec(sms)
            .map_err(|e| DeliveryError::Transport(format!("Cannot encode SMS: {e}")))?;

        let socket = self
            .socket
            .lock()
            .map_err(|_| DeliveryError::Transport("SMS socket lock poisoned".to_string()))?;
        socket
            .send(payload, 0)
            .map_err(|e| DeliveryError::Transport(e.to_string()))
    }
}
