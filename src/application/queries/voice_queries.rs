//! Voice Queries

/// 列出所有可选音色
#[derive(Debug, Clone)]
pub struct ListVoiceTypes;
