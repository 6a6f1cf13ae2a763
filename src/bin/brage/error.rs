pub(crate) use anyhow::Error;

pub(crate) type Result<T, E = Error> = std::result::Result<T, E>;

/// Exit code for a failed command, based on the first config error in its chain.
pub(crate) fn exit_code(err: &Error) -> proc_exit::Code {
    for cause in err.chain() {
        if let Some(err) = cause.downcast_ref::<brage::Error>() {
            return match err {
                brage::Error::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                    proc_exit::sysexits::NO_INPUT
                }
                brage::Error::Io { .. } => proc_exit::sysexits::IO_ERR,
                brage::Error::Parse { .. } | brage::Error::Schema { .. } => {
                    proc_exit::sysexits::CONFIG_ERR
                }
                _ => proc_exit::Code::FAILURE,
            };
        }
    }
    proc_exit::Code::FAILURE
}

pub(crate) fn not_implemented(command: &str) -> Error {
    anyhow::anyhow!("`{command}` is not implemented yet")
}
