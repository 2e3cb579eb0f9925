mod dropdown;
mod indicator;
