//! 奖励目录模型

use serde::{Deserialize, Serialize};

/// 奖励
///
/// 静态目录项，运行期间不修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub id: String,
    pub name: String,
    pub description: String,
    pub points_cost: u64,
    pub category: String,
    pub image_url: String,
    pub available: bool,
}

/// 按分类分组的奖励
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardCategory {
    pub category: String,
    pub rewards: Vec<Reward>,
}

impl RewardCategory {
    /// 按分类分组，分类顺序为首次出现的顺序
    pub fn group(rewards: impl IntoIterator<Item = Reward>) -> Vec<Self> {
        let mut groups: Vec<Self> = Vec::new();
        for reward in rewards {
            match groups.iter_mut().find(|g| g.category == reward.category) {
                Some(group) => group.rewards.push(reward),
                None => groups.push(Self {
                    category: reward.category.clone(),
                    rewards: vec![reward],
                }),
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reward(id: &str, category: &str) -> Reward {
        Reward {
            id: id.to_string(),
            name: format!("Reward {}", id),
            description: String::new(),
            points_cost: 10,
            category: category.to_string(),
            image_url: String::new(),
            available: true,
        }
    }

    #[test]
    fn test_group_keeps_first_appearance_order() {
        let groups = RewardCategory::group(vec![
            reward("1", "Fuel"),
            reward("2", "Airtime"),
            reward("3", "Fuel"),
        ]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "Fuel");
        assert_eq!(groups[0].rewards.len(), 2);
        assert_eq!(groups[1].category, "Airtime");
    }
}
