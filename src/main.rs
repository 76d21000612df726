use std::process;

use minish::config::ConfigLoader;
use minish::environment::Environment;
use minish::prompt::ShellPrompt;
use minish::repl::Repl;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("MINISH_LOG", "warn")).init();

    let mut env = Environment::new();
    let config = ConfigLoader::load(&env);
    config.apply_env(&mut env);

    let mut repl = Repl::new(env, ShellPrompt::from_config(&config));
    match repl.run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("minish: {}", e);
            process::exit(1);
        }
    }
}
