pub mod acceleration;
pub mod aerodynamics;
pub mod kinematics;
