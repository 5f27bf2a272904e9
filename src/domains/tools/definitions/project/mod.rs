pub mod create_retro_project;

pub use build_and_test::BuildAndTestTool;
pub use create_retro_project::CreateRetroProjectTool;
