use super::{Database, NewClassSession, NewStudent, NewTeacher};
use crate::models::ClassStatus;

/// Seeds the demo department roster into an empty store.
pub fn seed_db<D: Database>(db: &mut D) {
    db.seed(
        demo_teachers().into_iter(),
        demo_students().into_iter(),
        demo_classes().into_iter(),
    );

    log::info!("seeded demo teachers, students and classes");
}

fn demo_teachers() -> Vec<NewTeacher> {
    [
        ("Dr. Md. Shahin Uddin", "mdshahinuddin@mbstu.ac.bd"),
        ("Md. Anowar Kabir", "anowarkabir@mbstu.ac.bd"),
        ("Dr. Nazrul Islam", "nazrul@mbstu.ac.bd"),
        ("Dr. Mst. Nargis Akhter", "nargis@mbstu.ac.bd"),
        ("Dr. Md. Badrul Alam Miah", "badrul@mbstu.ac.bd"),
        ("Dr. Ziaur Rahman", "zia@mbstu.ac.bd"),
    ]
    .iter()
    .map(|(name, email)| NewTeacher {
        name: name.to_string(),
        email: email.to_string(),
        password: "teacher123".to_string(),
    })
    .collect()
}

fn demo_students() -> Vec<NewStudent> {
    [
        ("MD.Atif Rahman Rudro", "it22002@mbstu.ac.bd"),
        ("Ujjal Barai", "it22009@mbstu.ac.bd"),
        ("Rajon Islam Noyon", "it22015@mbstu.ac.bd"),
    ]
    .iter()
    .map(|(name, email)| NewStudent {
        name: name.to_string(),
        email: email.to_string(),
        password: "student123".to_string(),
    })
    .collect()
}

fn demo_classes() -> Vec<NewClassSession> {
    [
        (
            "ICT-3207",
            "Computer Organization & Architecture",
            "09:00-09:50",
            "R-206",
        ),
        (
            "ICT-3204",
            "Web Application Development Lab",
            "10:00-10:50",
            "R-226A",
        ),
        (
            "ICT-3203",
            "Web Application Development",
            "11:00-11:50",
            "R-226A",
        ),
    ]
    .iter()
    .map(|(course, course_name, time, room)| NewClassSession {
        course: course.to_string(),
        course_name: course_name.to_string(),
        semester: "6th".to_string(),
        day: "Saturday".to_string(),
        time: time.to_string(),
        room: room.to_string(),
        teacher: "Anowar Sir".to_string(),
        teacher_email: "anowarkabir@mbstu.ac.bd".to_string(),
        status: Some(ClassStatus::Scheduled),
    })
    .collect()
}
