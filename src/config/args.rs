//! 命令行参数定义

use clap::{Args, Parser, Subcommand};
use migration::ScriptKind;

/// 员工考勤服务
#[derive(Parser, Debug)]
#[command(name = "attendance-service")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// 配置文件路径（默认 config.toml）
    #[arg(short, long, global = true, env = "APP_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 启动 HTTP 服务（默认）
    Serve,
    /// 执行所有待处理的表结构和数据脚本
    Migrate,
    /// 生成新的表结构或数据脚本
    MakeScript(MakeScriptArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct MakeScriptArgs {
    /// 脚本名称，例如 "create users table"
    pub name: String,

    /// 脚本类别: schema（别名 migration）或 seed
    #[arg(short = 't', long = "type", value_parser = parse_script_kind)]
    pub kind: ScriptKind,
}

/// 与脚本生成器共用同一套类别解析
fn parse_script_kind(value: &str) -> Result<ScriptKind, String> {
    value.parse::<ScriptKind>().map_err(|e| e.to_string())
}

impl Cli {
    /// 未指定子命令时启动服务
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_serve() {
        let cli = Cli::try_parse_from(["attendance-service"]).unwrap();
        assert_eq!(cli.resolved_command(), Command::Serve);
    }

    #[test]
    fn test_config_flag_is_global() {
        let cli = Cli::try_parse_from(["attendance-service", "migrate", "-c", "custom.toml"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
        assert_eq!(cli.resolved_command(), Command::Migrate);

        let cli = Cli::try_parse_from(["attendance-service", "--config=custom.toml"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
    }

    #[test]
    fn test_make_script_args() {
        let cli = Cli::try_parse_from([
            "attendance-service",
            "make-script",
            "create users table",
            "--type",
            "seed",
        ])
        .unwrap();

        match cli.resolved_command() {
            Command::MakeScript(args) => {
                assert_eq!(args.name, "create users table");
                assert_eq!(args.kind, ScriptKind::Seed);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_make_script_accepts_migration_alias() {
        let cli =
            Cli::try_parse_from(["attendance-service", "make-script", "x", "--type=migration"])
                .unwrap();
        assert!(matches!(
            cli.resolved_command(),
            Command::MakeScript(MakeScriptArgs {
                kind: ScriptKind::Schema,
                ..
            })
        ));
    }

    #[test]
    fn test_make_script_requires_valid_type() {
        assert!(Cli::try_parse_from(["attendance-service", "make-script", "x"]).is_err());
        assert!(
            Cli::try_parse_from(["attendance-service", "make-script", "x", "--type", "fixture"])
                .is_err()
        );
    }

    #[test]
    fn test_make_script_type_uses_script_kind_parser() {
        let cli = Cli::try_parse_from(["attendance-service", "make-script", "x", "-t", " SEED "])
            .unwrap();
        assert!(matches!(
            cli.resolved_command(),
            Command::MakeScript(MakeScriptArgs {
                kind: ScriptKind::Seed,
                ..
            })
        ));

        let err = Cli::try_parse_from(["attendance-service", "make-script", "x", "-t", "fixture"])
            .unwrap_err();
        assert!(err.to_string().contains("unknown script kind 'fixture'"));
    }
}
