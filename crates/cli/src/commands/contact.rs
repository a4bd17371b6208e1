//! Contact message command.

use golden_crumb_core::contact::ContactForm;

use super::checkout::describe;
use crate::api::{ApiClient, ApiError};

/// Validate locally, then send the message.
///
/// # Errors
///
/// Returns the field errors if validation fails, or an API error if the
/// message is refused.
pub async fn run(api: &ApiClient, form: &ContactForm) -> Result<(), Box<dyn std::error::Error>> {
    if let Err(errors) = form.validate() {
        #[allow(clippy::print_stderr)]
        {
            eprintln!("Please fix the following:\n{}", describe(&errors));
        }
        return Err(errors.into());
    }

    match api.send_contact(form).await {
        Ok(()) => {
            #[allow(clippy::print_stdout)]
            {
                println!("Thanks! Your message was sent.");
            }
            Ok(())
        }
        Err(ApiError::Rejected {
            fields: Some(fields),
            ..
        }) => {
            #[allow(clippy::print_stderr)]
            {
                eprintln!("The bakery rejected the message:\n{}", describe(&fields));
            }
            Err(fields.into())
        }
        Err(e) => Err(e.into()),
    }
}
