//! CLI 模块
//!
//! 提供命令行接口，支持以下功能：
//!
//! - `server` - 启动积分 HTTP 服务
//! - `catalog` - 以 JSON 输出奖励、礼品与国家目录
//!
//! # 使用示例
//!
//! ```bash
//! # 启动服务器并生成 50 个演示客户
//! loyalty-server server --port 5000 --populate 50
//!
//! # 查看目录
//! loyalty-server catalog
//! ```

pub mod commands;
pub mod runner;

pub use commands::{Cli, Commands};
pub use runner::CommandRunner;
