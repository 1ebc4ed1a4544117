mod clientbound_pong;
mod clientbound_response;
mod serverbound_ping;
mod serverbound_request;

pub use clientbound_pong::{ClientBoundStatusPong, CLIENTBOUND_STATUS_PONG_ID};
pub use clientbound_response::{
    ClientBoundStatusResponse, PlayersJson, StatusJson, VersionJson, CLIENTBOUND_STATUS_RESPONSE_ID,
};
pub use serverbound_ping::{ServerBoundStatusPing, SERVERBOUND_STATUS_PING_ID};
pub use serverbound_request::{ServerBoundStatusRequest, SERVERBOUND_STATUS_REQUEST_ID};
