use crate::error::model_error::ModelError;
use crate::SocketTarget;

const WS_SCHEME: &str = "ws://";
const WSS_SCHEME: &str = "wss://";

/// Builder for creating validated SocketTarget instances.
#[derive(Debug, Default)]
pub struct SocketTargetBuilder {
    name: Option<String>,
    address: Option<String>,
    protocol: Option<String>,
}

impl SocketTargetBuilder {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// Build the SocketTarget with validation.
    #[track_caller]
    pub fn build(self) -> Result<SocketTarget, ModelError> {
        let name = self
            .name
            .ok_or_else(|| ModelError::validation("Socket name is required"))?;

        if name.is_empty() {
            return Err(ModelError::validation("Socket name cannot be empty"));
        }

        let address = self
            .address
            .ok_or_else(|| ModelError::validation("Socket address is required"))?;

        if address.is_empty() {
            return Err(ModelError::validation("Socket address cannot be empty"));
        }

        if !address.starts_with(WS_SCHEME) && !address.starts_with(WSS_SCHEME) {
            return Err(ModelError::validation(format!(
                "Invalid socket address format: {address}"
            )));
        }

        if let Some(ref protocol) = self.protocol {
            if protocol.is_empty() {
                return Err(ModelError::validation("Socket protocol cannot be empty"));
            }
        }

        Ok(SocketTarget {
            name,
            address,
            protocol: self.protocol,
        })
    }
}
