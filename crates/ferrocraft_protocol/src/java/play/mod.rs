mod clientbound_chat;
mod clientbound_disconnect;
mod clientbound_helditemchange;
mod clientbound_joingame;
mod clientbound_keepalive;
mod clientbound_positionandlook;
mod clientbound_spawnposition;
mod clientbound_updatehealth;
mod serverbound_chatmessage;
mod serverbound_keepalive;
mod serverbound_position;
mod serverbound_positionandlook;

pub use clientbound_chat::{ChatPosition, ClientBoundChat, CLIENTBOUND_CHAT_ID};
pub use clientbound_disconnect::{ClientBoundPlayDisconnect, CLIENTBOUND_PLAY_DISCONNECT_ID};
pub use clientbound_helditemchange::{ClientBoundHeldItemChange, CLIENTBOUND_HELD_ITEM_CHANGE_ID};
pub use clientbound_joingame::{ClientBoundJoinGame, CLIENTBOUND_JOIN_GAME_ID};
pub use clientbound_keepalive::{ClientBoundKeepAlive, CLIENTBOUND_KEEP_ALIVE_ID};
pub use clientbound_positionandlook::{
    ClientBoundPositionAndLook, CLIENTBOUND_POSITION_AND_LOOK_ID,
};
pub use clientbound_spawnposition::{ClientBoundSpawnPosition, CLIENTBOUND_SPAWN_POSITION_ID};
pub use clientbound_updatehealth::{ClientBoundUpdateHealth, CLIENTBOUND_UPDATE_HEALTH_ID};
pub use serverbound_chatmessage::{ServerBoundChatMessage, SERVERBOUND_CHAT_MESSAGE_ID};
pub use serverbound_keepalive::{ServerBoundKeepAlive, SERVERBOUND_KEEP_ALIVE_ID};
pub use serverbound_position::{ServerBoundPlayerPosition, SERVERBOUND_PLAYER_POSITION_ID};
pub use serverbound_positionandlook::{
    ServerBoundPositionAndLook, SERVERBOUND_POSITION_AND_LOOK_ID,
};
