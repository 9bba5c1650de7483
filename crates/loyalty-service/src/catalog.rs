//! 静态目录数据
//!
//! 奖励目录、礼品目录、演示客户以及汇款目的国家表。

use crate::models::{Gift, NewCustomer, Reward};

/// 汇款目的国家（代码, 显示名称）
pub const COUNTRIES: &[(&str, &str)] = &[
    ("ZW", "Zimbabwe"),
    ("ZA", "South Africa"),
    ("KE", "Kenya"),
    ("ZM", "Zambia"),
    ("MZ", "Mozambique"),
    ("UG", "Uganda"),
    ("TZ", "Tanzania"),
    ("MW", "Malawi"),
    ("BW", "Botswana"),
    ("LS", "Lesotho"),
    ("AO", "Angola"),
    ("GH", "Ghana"),
    ("ET", "Ethiopia"),
    ("BD", "Bangladesh"),
    ("CN", "China"),
    ("IN", "India"),
    ("EU", "European Union"),
    ("UK", "United Kingdom"),
];

/// 根据国家代码获取显示名称
///
/// 未知代码原样返回
pub fn country_name(code: &str) -> &str {
    COUNTRIES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, name)| *name)
        .unwrap_or(code)
}

fn reward(
    id: &str,
    name: &str,
    description: &str,
    points_cost: u64,
    category: &str,
    image_url: &str,
) -> Reward {
    Reward {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        points_cost,
        category: category.to_string(),
        image_url: image_url.to_string(),
        available: true,
    }
}

/// 默认奖励目录
pub fn default_rewards() -> Vec<Reward> {
    vec![
        reward(
            "1",
            "R50 Airtime Voucher",
            "Top up your phone with R50 airtime",
            50,
            "Airtime",
            "https://pixabay.com/get/g771e5a88046d7b4af608a63d7c3536fd00207e983f2c4b83fd8a989b53e0a944bd47c37cddbea986a7976b2358fc536633fc736dccff55db344aa41b4d33dc18_1280.jpg",
        ),
        reward(
            "2",
            "R100 Grocery Voucher",
            "Shop for groceries with this R100 voucher",
            100,
            "Grocery",
            "https://pixabay.com/get/gb3be1765ddc3a29af2788f60782f804bfb810a81b3921037a0242797981f34c445814e39ebc0149dfae4bc5f3d0dfbbeb746ce8992ce30ac694cef79d05264ea_1280.jpg",
        ),
        reward(
            "3",
            "R200 Fuel Voucher",
            "Fill up your tank with this R200 fuel voucher",
            200,
            "Fuel",
            "https://pixabay.com/get/g0d06557dec40d414105b334be76d2b0e1099078bd7011acb8490560095640ea8aaf66ea84b1ead729e4cbeb3e185864ac84f5e4b9c24b1751ac1858deb23f1e9_1280.jpg",
        ),
        reward(
            "4",
            "Movie Tickets (2x)",
            "Enjoy a night out with 2 movie tickets",
            150,
            "Entertainment",
            "https://pixabay.com/get/g0721e2ce8d1c301fafdd58d4631d04b9e639ef008f24fdd32b3dc67207197aed0fc6da0a2ca091228a7691f9be26b4189fdf7d70652b82c6ff85e8325a384953_1280.jpg",
        ),
        reward(
            "5",
            "R500 Shopping Voucher",
            "Premium shopping voucher for your favorite stores",
            500,
            "Shopping",
            "https://pixabay.com/get/g54ae655bd70006c6d4181e0fc066c3475e54f52cdbeb030799aaea67cf901ba942c561a4c0afa150aca9c83ee0f2016a9a908c024641a918bf783a80065ea02f_1280.jpg",
        ),
        reward(
            "6",
            "Weekend Getaway Voucher",
            "R1000 voucher for a weekend getaway",
            1000,
            "Travel",
            "https://pixabay.com/get/g06178f99c0b77ead5d41935dff253d5bddad10910c29bb970f49d8171340945511312bbd89b9dee00fc7e87e77298c90dd056cd3fcdc2e1f7417ed9452844900_1280.jpg",
        ),
    ]
}

fn gift(id: &str, name: &str, description: &str, points_cost: u64, icon: &str) -> Gift {
    Gift {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        points_cost,
        icon: icon.to_string(),
    }
}

/// 默认礼品目录
pub fn default_gifts() -> Vec<Gift> {
    vec![
        gift("airtime50", "R50 Airtime", "Mobile airtime voucher", 50, "fas fa-mobile-alt"),
        gift(
            "grocery100",
            "R100 Grocery Voucher",
            "Shoprite/Checkers voucher",
            100,
            "fas fa-shopping-cart",
        ),
        gift("fuel200", "R200 Fuel Voucher", "Shell/BP fuel voucher", 200, "fas fa-gas-pump"),
        gift(
            "entertainment500",
            "R500 Entertainment",
            "Netflix/Showmax voucher",
            500,
            "fas fa-film",
        ),
    ]
}

/// 演示客户，初始余额均为 0
pub fn demo_customers() -> Vec<NewCustomer> {
    vec![
        NewCustomer::new("John Doe", "john.doe@email.com", "+27123456789").with_id("1"),
        NewCustomer::new("Sarah Smith", "sarah.smith@email.com", "+27987654321").with_id("2"),
        NewCustomer::new("Michael Johnson", "michael.j@email.com", "+27555666777").with_id("3"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_name() {
        assert_eq!(country_name("ZW"), "Zimbabwe");
        assert_eq!(country_name("za"), "South Africa");
        assert_eq!(country_name("XX"), "XX");
        assert_eq!(COUNTRIES.len(), 18);
    }

    #[test]
    fn test_reward_catalog() {
        let rewards = default_rewards();
        assert_eq!(rewards.len(), 6);
        assert!(rewards.iter().all(|r| r.points_cost > 0 && r.available));

        let costs: Vec<u64> = rewards.iter().map(|r| r.points_cost).collect();
        assert_eq!(costs, vec![50, 100, 200, 150, 500, 1000]);
    }

    #[test]
    fn test_gift_catalog() {
        let gifts = default_gifts();
        let ids: Vec<&str> = gifts.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["airtime50", "grocery100", "fuel200", "entertainment500"]);
    }

    #[test]
    fn test_demo_customers() {
        let customers = demo_customers();
        assert_eq!(customers.len(), 3);
        assert_eq!(customers[0].id.as_deref(), Some("1"));
        assert!(customers.iter().all(|c| c.opening_balance == 0));
    }
}
