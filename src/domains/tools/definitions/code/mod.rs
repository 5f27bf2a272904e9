pub mod compile_rom;
pub mod edit_instruction_file;
pub mod set_code_opacity;

pub use compile_rom::CompileRomTool;
pub use edit_instruction_file::EditInstructionFileTool;
pub use set_code_opacity::SetCodeOpacityTool;
