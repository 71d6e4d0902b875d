/// `user.name` from the global and system git configuration, if set.
pub fn global_username() -> Option<String> {
    let config = match gix::config::File::from_globals() {
        Ok(config) => config,
        Err(err) => {
            log::debug!("Global git configuration unavailable: {err}");
            return None;
        }
    };

    config
        .string("user.name")
        .map(|name| name.to_string().trim().to_string())
        .filter(|name| !name.is_empty())
}
