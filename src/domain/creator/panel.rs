//! Creator Context - 排行面板

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::domain::Navigation;

/// "Top Podcast" 列表展示的条目数
pub const TOP_PODCASTS_LIMIT: usize = 3;

/// 排行条目（只读）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopCreator {
    pub identity_ref: String,
    pub name: String,
    pub image_url: String,
    pub total_podcasts: u64,
}

impl TopCreator {
    /// 点击条目时的跳转目标
    pub fn navigation(&self) -> Navigation {
        Navigation::Profile(self.identity_ref.clone())
    }
}

// 附带跳转路径，客户端无需自行拼接
impl Serialize for TopCreator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TopCreator", 5)?;
        state.serialize_field("identity_ref", &self.identity_ref)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("image_url", &self.image_url)?;
        state.serialize_field("total_podcasts", &self.total_podcasts)?;
        state.serialize_field("profile_path", &self.navigation().path())?;
        state.end()
    }
}

/// 已登录的访问者，展示在面板顶部并链接到自己的主页
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelViewer {
    pub identity_ref: String,
    pub name: String,
    pub image_url: String,
}

impl PanelViewer {
    pub fn navigation(&self) -> Navigation {
        Navigation::Profile(self.identity_ref.clone())
    }
}

impl Serialize for PanelViewer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PanelViewer", 4)?;
        state.serialize_field("identity_ref", &self.identity_ref)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("image_url", &self.image_url)?;
        state.serialize_field("profile_path", &self.navigation().path())?;
        state.end()
    }
}

/// 面板视图
///
/// 排序完全沿用查询结果，面板本身不做分页、过滤或排序
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PanelView {
    /// 首次加载尚未完成
    Loading,
    Ready {
        /// 未登录或尚未同步时为 None
        viewer: Option<PanelViewer>,
        /// "Fans Like You" 轮播，完整列表
        carousel: Vec<TopCreator>,
        /// "Top Podcast" 列表，仅前三名
        top: Vec<TopCreator>,
    },
}

impl PanelView {
    pub fn render(ranking: Option<Vec<TopCreator>>, viewer: Option<PanelViewer>) -> Self {
        match ranking {
            None => PanelView::Loading,
            Some(carousel) => {
                let top = carousel.iter().take(TOP_PODCASTS_LIMIT).cloned().collect();
                PanelView::Ready {
                    viewer,
                    carousel,
                    top,
                }
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PanelView::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creator(identity_ref: &str, total: u64) -> TopCreator {
        TopCreator {
            identity_ref: identity_ref.to_string(),
            name: format!("User {}", identity_ref),
            image_url: format!("https://img.example/{}.png", identity_ref),
            total_podcasts: total,
        }
    }

    #[test]
    fn test_loading_when_absent() {
        let view = PanelView::render(None, None);
        assert!(view.is_loading());
    }

    #[test]
    fn test_ready_slices_first_three_in_order() {
        let ranking = vec![
            creator("u1", 9),
            creator("u2", 7),
            creator("u3", 7),
            creator("u4", 2),
            creator("u5", 0),
        ];

        let view = PanelView::render(Some(ranking.clone()), None);

        match view {
            PanelView::Ready {
                viewer,
                carousel,
                top,
            } => {
                assert!(viewer.is_none());
                assert_eq!(carousel, ranking);
                assert_eq!(top, ranking[..3].to_vec());
            }
            PanelView::Loading => panic!("expected ready view"),
        }
    }

    #[test]
    fn test_short_ranking_is_not_padded() {
        let view = PanelView::render(Some(vec![creator("u1", 1)]), None);
        match view {
            PanelView::Ready { top, .. } => assert_eq!(top.len(), 1),
            PanelView::Loading => panic!("expected ready view"),
        }
    }

    #[test]
    fn test_entry_navigates_to_profile() {
        let entry = creator("clerk_abc", 3);
        assert_eq!(entry.navigation().path(), "/profile/clerk_abc");
    }

    #[test]
    fn test_serialized_entries_carry_profile_path() {
        let viewer = PanelViewer {
            identity_ref: "clerk_me".to_string(),
            name: "Me".to_string(),
            image_url: String::new(),
        };
        let view = PanelView::render(Some(vec![creator("clerk_abc", 3)]), Some(viewer));

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["state"], "ready");
        assert_eq!(json["top"][0]["profile_path"], "/profile/clerk_abc");
        assert_eq!(json["carousel"][0]["profile_path"], "/profile/clerk_abc");
        assert_eq!(json["viewer"]["profile_path"], "/profile/clerk_me");
    }

    #[test]
    fn test_loading_has_no_viewer() {
        let viewer = PanelViewer {
            identity_ref: "clerk_me".to_string(),
            name: "Me".to_string(),
            image_url: String::new(),
        };
        let json = serde_json::to_value(PanelView::render(None, Some(viewer))).unwrap();
        assert_eq!(json, serde_json::json!({"state": "loading"}));
    }
}
