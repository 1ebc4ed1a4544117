mod clientbound_disconnect;
mod clientbound_encryptionrequest;
mod clientbound_loginsuccess;
mod clientbound_setcompression;
mod serverbound_encryptionresponse;
mod serverbound_loginstart;

pub use clientbound_disconnect::{ClientBoundLoginDisconnect, CLIENTBOUND_LOGIN_DISCONNECT_ID};
pub use clientbound_encryptionrequest::{
    ClientBoundEncryptionRequest, CLIENTBOUND_ENCRYPTION_REQUEST_ID,
};
pub use clientbound_loginsuccess::{ClientBoundLoginSuccess, CLIENTBOUND_LOGIN_SUCCESS_ID};
pub use clientbound_setcompression::{ClientBoundSetCompression, CLIENTBOUND_SET_COMPRESSION_ID};
pub use serverbound_encryptionresponse::{
    ServerBoundEncryptionResponse, SERVERBOUND_ENCRYPTION_RESPONSE_ID,
};
pub use serverbound_loginstart::{ServerBoundLoginStart, SERVERBOUND_LOGIN_START_ID};
