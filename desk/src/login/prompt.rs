use std::error::Error;
use std::io;
use std::result::Result;
use std::str::FromStr;

/// Prompt for interactive keyboard input if given value is [None].
pub fn prompt_if_missing<T: FromStr>(
    x: Option<T>,
    prompt: &str,
) -> Result<T, ManualInputError<<T as FromStr>::Err>>
where
    <T as FromStr>::Err: Error,
{
    match x {
        Some(v) => Ok(v),
        None => {
            let input: String = dialoguer::Input::new()
                .with_prompt(prompt)
                .interact_text()
                .map_err(ManualInputError::Dialoguer)?;
            T::from_str(input.trim()).map_err(ManualInputError::ValueError)
        }
    }
}

/// Same as [prompt_if_missing] but input is hidden as it's typed,
/// or read from stdin without prompting.
pub fn prompt_if_missing_password(
    x: Option<String>,
    prompt: &str,
    from_stdin: bool,
) -> Result<String, ManualInputError<std::convert::Infallible>> {
    match x {
        Some(v) => Ok(v),
        None if from_stdin => read_line().map_err(ManualInputError::IoError),
        None => dialoguer::Password::new()
            .with_prompt(prompt)
            .interact()
            .map_err(ManualInputError::Dialoguer),
    }
}

/// Read a line from stdin, without its line ending.
fn read_line() -> io::Result<String> {
    let mut buffer = String::new();
    io::stdin().read_line(&mut buffer)?;
    let len = buffer.trim_end_matches(&['\r', '\n']).len();
    buffer.truncate(len);
    Ok(buffer)
}

/// Errors which may occur while prompting for user input that is to be parsed into a NewType.
#[derive(thiserror::Error, Debug)]
pub enum ManualInputError<E: Error> {
    #[error(transparent)]
    IoError(io::Error),
    #[error(transparent)]
    Dialoguer(dialoguer::Error),
    #[error(transparent)]
    ValueError(E),
}
