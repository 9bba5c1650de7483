//! CLI 命令定义
//!
//! 使用 clap derive 宏定义命令行接口结构。

use clap::{Parser, Subcommand};

/// 积分服务命令行工具
#[derive(Parser, Debug)]
#[command(name = "loyalty-server")]
#[command(version, about = "汇款积分奖励演示服务")]
#[command(propagate_version = true)]
pub struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)，覆盖配置文件
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// 子命令枚举
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 启动积分服务（HTTP REST API）
    Server {
        /// 服务端口，覆盖配置文件
        #[arg(short, long)]
        port: Option<u16>,

        /// 额外生成的随机客户数量
        #[arg(long, default_value = "0")]
        populate: usize,
    },

    /// 输出奖励、礼品与目的国家目录（JSON）
    Catalog,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_server() {
        let cli = Cli::parse_from(["loyalty-server", "server"]);
        match cli.command {
            Commands::Server { port, populate } => {
                assert!(port.is_none());
                assert_eq!(populate, 0);
            }
            _ => panic!("预期 Server 命令"),
        }
        assert!(cli.log_level.is_none());

        let cli = Cli::parse_from([
            "loyalty-server",
            "server",
            "--port",
            "9000",
            "--populate",
            "25",
            "--log-level",
            "debug",
        ]);
        match cli.command {
            Commands::Server { port, populate } => {
                assert_eq!(port, Some(9000));
                assert_eq!(populate, 25);
            }
            _ => panic!("预期 Server 命令"),
        }
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_cli_parse_catalog() {
        let cli = Cli::parse_from(["loyalty-server", "-l", "warn", "catalog"]);
        assert!(matches!(cli.command, Commands::Catalog));
        assert_eq!(cli.log_level.as_deref(), Some("warn"));
    }

    #[test]
    fn test_cli_rejects_unknown_command() {
        assert!(Cli::try_parse_from(["loyalty-server", "generate"]).is_err());
    }
}
