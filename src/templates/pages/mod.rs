pub mod moth_email;
