use crate::commands::{config, init, sql};

#[derive(Clone, Copy)]
pub struct ExampleGroup {
    pub title: &'static str,
    pub commands: &'static [&'static str],
}

#[derive(Clone, Copy)]
pub struct CommandExample {
    pub name: &'static str,
    pub groups: &'static [ExampleGroup],
}

pub fn command_examples() -> &'static [CommandExample] {
    &[
        CommandExample {
            name: "init",
            groups: init::EXAMPLES,
        },
        CommandExample {
            name: "config",
            groups: config::EXAMPLES,
        },
        CommandExample {
            name: "sql",
            groups: sql::EXAMPLES,
        },
    ]
}
