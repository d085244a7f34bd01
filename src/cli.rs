use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "doc_checker", version, about = "文档评估客户端")]
pub struct Cli {
    /// 评估服务地址（覆盖 EVALUATION_API_URL）
    #[arg(long, global = true)]
    pub server: Option<String>,
    /// 输出详细日志
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 暂存文件并提交评估
    Evaluate {
        /// TOML 任务清单
        #[arg(long, env = "JOB_FILE")]
        job: Option<PathBuf>,
        /// 提交文件（ZIP）
        #[arg(long)]
        submission: Option<PathBuf>,
        /// 参考文件，可重复
        #[arg(long = "reference")]
        references: Vec<PathBuf>,
        /// 使用服务端参考数据库
        #[arg(long, default_value_t = false)]
        use_database: bool,
    },
    /// 查询评估服务健康状态
    Health,
    /// 重新生成服务端元数据库
    GenerateMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_evaluate() {
        let cli = Cli::parse_from([
            "doc_checker",
            "evaluate",
            "--submission",
            "abgabe.zip",
            "--reference",
            "a.pdf",
            "--reference",
            "b.png",
        ]);

        match cli.command {
            Commands::Evaluate {
                submission,
                references,
                use_database,
                ..
            } => {
                assert_eq!(submission, Some(PathBuf::from("abgabe.zip")));
                assert_eq!(references.len(), 2);
                assert!(!use_database);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_server() {
        let cli = Cli::parse_from(["doc_checker", "health", "--server", "http://h:1"]);
        assert_eq!(cli.server.as_deref(), Some("http://h:1"));
        assert!(matches!(cli.command, Commands::Health));
    }
}
