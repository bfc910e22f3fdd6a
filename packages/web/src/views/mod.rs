mod login;
pub use login::Login;

mod signup;
pub use signup::Signup;

mod student;
pub use student::StudentDashboard;

mod teacher;
pub use teacher::TeacherDashboard;
