//! Voice Query Handlers

use crate::application::queries::ListVoiceTypes;
use crate::domain::podcast::VoiceType;

/// 音色选项
#[derive(Debug, Clone)]
pub struct VoiceTypeResponse {
    pub voice_type: String,
    pub preview_url: String,
}

impl From<VoiceType> for VoiceTypeResponse {
    fn from(voice_type: VoiceType) -> Self {
        Self {
            voice_type: voice_type.as_str().to_string(),
            preview_url: voice_type.preview_url(),
        }
    }
}

/// ListVoiceTypes Handler
#[derive(Default)]
pub struct ListVoiceTypesHandler;

impl ListVoiceTypesHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, _query: ListVoiceTypes) -> Vec<VoiceTypeResponse> {
        VoiceType::ALL.into_iter().map(VoiceTypeResponse::from).collect()
    }
}
