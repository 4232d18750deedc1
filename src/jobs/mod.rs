pub mod backup_job;
