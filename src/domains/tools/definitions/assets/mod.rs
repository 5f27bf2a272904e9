pub mod create_asset;
pub mod generate_sprite;

pub use create_asset::CreateAssetTool;
pub use generate_sprite::GenerateSpriteTool;
